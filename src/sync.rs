#[cfg(all(feature = "sync", feature = "std"))]
pub(crate) use std::sync::Mutex;

#[cfg(all(feature = "sync", not(feature = "std")))]
pub(crate) use spin::Mutex;

#[cfg(feature = "sync")]
pub(crate) type Shared<T> = Mutex<T>;
#[cfg(not(feature = "sync"))]
pub(crate) type Shared<T> = core::cell::RefCell<T>;

pub(crate) fn shared<T>(t: T) -> Shared<T> {
    match () {
        #[cfg(feature = "sync")]
        () => Mutex::new(t),
        #[cfg(not(feature = "sync"))]
        () => core::cell::RefCell::new(t),
    }
}

pub(crate) fn into_inner<T>(shared: Shared<T>) -> T {
    match () {
        #[cfg(all(feature = "sync", feature = "std"))]
        () => shared.into_inner().unwrap_or_else(|e| e.into_inner()),
        #[cfg(all(feature = "sync", not(feature = "std")))]
        () => shared.into_inner(),
        #[cfg(not(feature = "sync"))]
        () => shared.into_inner(),
    }
}

macro_rules! acquire {
    ($shared: expr) => {
        match () {
            #[cfg(all(feature = "sync", feature = "std"))]
            () => $shared.lock().unwrap_or_else(|e| e.into_inner()),
            #[cfg(all(feature = "sync", not(feature = "std")))]
            () => $shared.lock(),
            #[cfg(not(feature = "sync"))]
            () => $shared.borrow_mut(),
        }
    };
}

pub(crate) use acquire;
