
use crate::{
    storage::{Fits, MaxAlign, Storage},
    vtable::VTable,
};
use core::{
    fmt::{self, Formatter, Debug},
    marker::PhantomData,
    mem,
};
use log::trace;

// internals
// ---------
//
// a thunk is inline storage plus a `&'static VTable`. the vtable is never
// null: an empty thunk points at `VTable::EMPTY`, whose operations do
// nothing. whenever the storage holds a live `F`, the vtable is the one
// generated for `F`.
//
// before anything that can panic runs against a thunk whose old value has
// been dropped (a clone, a destructor), the vtable is reset to
// `VTable::EMPTY`, so unwinding never drops the storage twice.

/// A nullary callable of any type, held inline in `N` bytes aligned like `A`.
///
/// Cloning a `Thunk` clones the held callable, state included. Calling it
/// calls the held callable by mutable reference, discarding whatever it
/// returns. A default `Thunk` holds nothing and does nothing when called.
///
/// A callable that does not fit is rejected when the crate using it is
/// built, whether it is too large:
///
/// ```compile_fail
/// use inline_thunk::Thunk;
///
/// let big = [0u8; 64];
/// let mut thunk: Thunk<16> = Thunk::from_callable(move || {
///     let _ = big.len();
/// });
/// thunk.call();
/// ```
///
/// or more strictly aligned than the storage:
///
/// ```compile_fail
/// use inline_thunk::Thunk;
///
/// #[derive(Clone, Copy)]
/// #[repr(align(32))]
/// struct Wide(u8);
///
/// impl Wide {
///     fn get(&self) -> u8 {
///         self.0
///     }
/// }
///
/// let wide = Wide(1);
/// let mut thunk: Thunk<64> = Thunk::from_callable(move || {
///     let _ = wide.get();
/// });
/// thunk.call();
/// ```
///
/// Once bound, a thunk stays bound until it is dropped; there is no way to
/// empty it in place:
///
/// ```compile_fail
/// use inline_thunk::Thunk;
///
/// let mut thunk: Thunk<16> = Thunk::from_callable(|| ());
/// thunk.clear();
/// ```
///
/// `Thunk` is neither `Send` nor `Sync`; callers that share one across
/// threads must wrap it in their own synchronization.
pub struct Thunk<const N: usize, A = MaxAlign> {
    pub(crate) storage: Storage<N, A>,
    pub(crate) vtable: &'static VTable,
    _not_send: PhantomData<*const ()>,
}

impl<const N: usize, A> Thunk<N, A> {
    /// Bytes available for the held callable.
    pub const CAPACITY: usize = N;

    /// Alignment available for the held callable.
    pub const ALIGN: usize = Storage::<N, A>::ALIGN;

    /// Construct holding nothing. Calling it does nothing.
    pub const fn new() -> Self {
        Thunk {
            storage: Storage::new(),
            vtable: VTable::EMPTY,
            _not_send: PhantomData,
        }
    }

    /// Construct holding `f`.
    ///
    /// Fails to build if `F` is larger than `N` bytes or more strictly
    /// aligned than `A`.
    pub fn from_callable<F, R>(f: F) -> Self
    where
        F: FnMut() -> R + Clone + 'static,
    {
        let mut thunk = Self::new();
        thunk.put(f);
        thunk
    }

    /// Construct holding a function pointer.
    ///
    /// Behaves exactly like [`from_callable`][Self::from_callable] on the
    /// function item itself; this form exists so a named function coerces
    /// to a pointer without a cast at the call site.
    pub fn from_fn(f: fn()) -> Self {
        Self::from_callable(f)
    }

    /// Replace the held callable with `f`, dropping the old one first.
    pub fn set<F, R>(&mut self, f: F)
    where
        F: FnMut() -> R + Clone + 'static,
    {
        self.clear();
        self.put(f);
    }

    // drop the held callable, leaving the thunk empty. only ever the first
    // half of a rebind.
    fn clear(&mut self) {
        let vtable = mem::replace(&mut self.vtable, VTable::EMPTY);
        if vtable.bound {
            trace!("clearing thunk holding {}", (vtable.type_name)());
        }
        unsafe {
            (vtable.drop)(self.storage.as_mut_ptr());
        }
    }

    /// Call the held callable.
    ///
    /// The callable may mutate its own state; that state belongs to this
    /// thunk alone. A panic in the callable propagates to the caller
    /// untouched, and the thunk still holds the callable afterwards.
    pub fn call(&mut self) {
        unsafe {
            (self.vtable.invoke)(self.storage.as_mut_ptr());
        }
    }

    /// Whether the thunk holds nothing.
    pub fn is_empty(&self) -> bool {
        !self.vtable.bound
    }

    /// Name of the held callable's type, if any.
    pub fn held_type_name(&self) -> Option<&'static str> {
        if self.vtable.bound {
            Some((self.vtable.type_name)())
        } else {
            None
        }
    }

    // write `f` into storage. storage must not hold a live value.
    fn put<F, R>(&mut self, f: F)
    where
        F: FnMut() -> R + Clone + 'static,
    {
        let () = Fits::<F, N, A>::OK;
        debug_assert!(self.is_empty());
        unsafe {
            (self.storage.as_mut_ptr() as *mut F).write(f);
        }
        self.vtable = VTable::of::<F, R>();
        trace!("bound thunk to {}", (self.vtable.type_name)());
    }
}

impl<const N: usize, A> Clone for Thunk<N, A> {
    fn clone(&self) -> Self {
        let mut thunk = Self::new();
        unsafe {
            (self.vtable.clone_into)(self.storage.as_ptr(), thunk.storage.as_mut_ptr());
        }
        thunk.vtable = self.vtable;
        thunk
    }

    /// Copy-assignment: drops the held callable, then clones `source`'s in.
    ///
    /// If cloning panics the thunk is left empty.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        unsafe {
            (source.vtable.clone_into)(source.storage.as_ptr(), self.storage.as_mut_ptr());
        }
        self.vtable = source.vtable;
    }
}

impl<const N: usize, A> Drop for Thunk<N, A> {
    fn drop(&mut self) {
        unsafe {
            (self.vtable.drop)(self.storage.as_mut_ptr());
        }
    }
}

impl<const N: usize, A> Default for Thunk<N, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, A> Debug for Thunk<N, A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.held_type_name() {
            Some(name) => write!(f, "Thunk({})", name),
            None => f.write_str("Thunk(EMPTY)"),
        }
    }
}
