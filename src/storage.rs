
use core::{
    cell::UnsafeCell,
    marker::PhantomData,
    mem::{self, MaybeUninit},
};

/// Alignment marker at least as strict as any primitive type on supported targets.
///
/// This is the default alignment of [`Storage`] and [`Thunk`][crate::Thunk].
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(16))]
pub struct MaxAlign;

/// Alignment marker for 8-byte alignment.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(8))]
pub struct Align8;

/// Alignment marker for 32-byte alignment.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(32))]
pub struct Align32;

/// Alignment marker for 64-byte alignment.
#[derive(Debug, Clone, Copy, Default)]
#[repr(C, align(64))]
pub struct Align64;

/// `N` bytes of raw inline memory, aligned like `A`.
///
/// Any sized type can be used as `A`; only its alignment is adopted, no `A`
/// is ever stored. The bytes have no construction or destruction semantics
/// of their own.
#[repr(C)]
pub struct Storage<const N: usize, A = MaxAlign> {
    _align: [A; 0],
    bytes: UnsafeCell<[MaybeUninit<u8>; N]>,
}

impl<const N: usize, A> Storage<N, A> {
    /// Number of usable bytes.
    pub const CAPACITY: usize = N;

    /// Alignment of the first byte.
    pub const ALIGN: usize = mem::align_of::<Self>();

    /// Construct with uninitialized contents.
    pub const fn new() -> Self {
        Storage {
            _align: [],
            bytes: UnsafeCell::new([MaybeUninit::uninit(); N]),
        }
    }

    /// Number of usable bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Pointer to the first byte.
    ///
    /// The bytes sit in an `UnsafeCell`, so a value reached through this
    /// pointer keeps any interior mutability it has.
    pub fn as_ptr(&self) -> *mut u8 {
        self.bytes.get().cast()
    }

    /// Pointer to the first byte, from an exclusive reference.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bytes.get_mut().as_mut_ptr().cast()
    }
}

impl<const N: usize, A> Default for Storage<N, A> {
    fn default() -> Self {
        Self::new()
    }
}

// compile-time capacity check. referencing `Fits::<F, N, A>::OK` from a
// generic function makes every monomorphization with an oversized or
// overaligned `F` a build error.
pub(crate) struct Fits<F, const N: usize, A>(PhantomData<fn() -> (F, A)>);

impl<F, const N: usize, A> Fits<F, N, A> {
    pub(crate) const OK: () = {
        assert!(
            mem::size_of::<F>() <= N,
            "callable is larger than the thunk's inline storage",
        );
        assert!(
            mem::align_of::<F>() <= mem::align_of::<Storage<N, A>>(),
            "callable is more strictly aligned than the thunk's inline storage",
        );
    };
}
