use core::marker::PhantomData;

/// Little endian field at a fixed byte offset of an on-disk record
#[derive(Copy, Clone, Debug)]
pub(crate) struct Field<T>(usize, PhantomData<T>);

impl<T> Field<T> {
    pub const fn at(offset: usize) -> Self {
        Self(offset, PhantomData)
    }
}

macro_rules! define {
    ($type:ty) => {
        impl Field<$type> {
            #[inline]
            pub fn get(&self, bytes: &[u8]) -> $type {
                const LENGTH: usize = core::mem::size_of::<$type>();
                let mut array = [0u8; LENGTH];
                array.copy_from_slice(&bytes[self.0..self.0 + LENGTH]);
                <$type>::from_le_bytes(array)
            }

            #[inline]
            pub fn set(&self, bytes: &mut [u8], value: $type) {
                let array = <$type>::to_le_bytes(value);
                bytes[self.0..self.0 + array.len()].copy_from_slice(&array);
            }
        }
    };
}

define!(u8);
define!(u16);
define!(u32);

impl<const N: usize> Field<[u8; N]> {
    #[inline]
    pub fn get(&self, bytes: &[u8]) -> [u8; N] {
        let mut array = [0u8; N];
        array.copy_from_slice(&bytes[self.0..self.0 + N]);
        array
    }

    #[inline]
    pub fn set(&self, bytes: &mut [u8], value: [u8; N]) {
        bytes[self.0..self.0 + N].copy_from_slice(&value);
    }
}
