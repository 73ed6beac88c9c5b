
use core::{
    any::type_name,
    marker::PhantomData,
    ptr,
};

// internals
// ---------
//
// a vtable is the only place the concrete type of a held callable survives
// erasure. every function in it takes a raw pointer to the first byte of a
// thunk's storage:
//
// - `invoke` reads the storage as `&mut F` and calls it, dropping the result
// - `clone_into` reads the source storage as `&F` and writes a clone into
//   the uninitialized destination storage
// - `drop` drops the `F` in place
//
// the empty vtable does nothing in all three.
//
// `type_name` and `bound` are metadata for `Debug` and `is_empty`, not
// dispatch operations. nothing reads them on the call, clone or drop paths.

/// Type-specific operations for one concrete callable type.
pub(crate) struct VTable {
    pub(crate) invoke: unsafe fn(*mut u8),
    pub(crate) clone_into: unsafe fn(*const u8, *mut u8),
    pub(crate) drop: unsafe fn(*mut u8),
    pub(crate) type_name: fn() -> &'static str,
    pub(crate) bound: bool,
}

impl VTable {
    /// The vtable of a thunk that holds nothing.
    pub(crate) const EMPTY: &'static VTable = &VTable {
        invoke: empty_invoke,
        clone_into: empty_clone_into,
        drop: empty_drop,
        type_name: empty_type_name,
        bound: false,
    };

    /// The vtable for callable type `F`.
    pub(crate) fn of<F, R>() -> &'static VTable
    where
        F: FnMut() -> R + Clone + 'static,
    {
        Generator::<F, R>::VTABLE
    }
}

struct Generator<F, R>(PhantomData<fn() -> (F, R)>);

impl<F, R> Generator<F, R>
where
    F: FnMut() -> R + Clone + 'static,
{
    const VTABLE: &'static VTable = &VTable {
        invoke: invoke_impl::<F, R>,
        clone_into: clone_into_impl::<F>,
        drop: drop_impl::<F>,
        type_name: type_name::<F>,
        bound: true,
    };
}

unsafe fn invoke_impl<F: FnMut() -> R, R>(ptr: *mut u8) {
    let f = &mut *(ptr as *mut F);
    let _ = f();
}

unsafe fn clone_into_impl<F: Clone>(src: *const u8, dst: *mut u8) {
    let f = &*(src as *const F);
    (dst as *mut F).write(f.clone());
}

unsafe fn drop_impl<F>(ptr: *mut u8) {
    ptr::drop_in_place(ptr as *mut F);
}

unsafe fn empty_invoke(_: *mut u8) {}

unsafe fn empty_clone_into(_: *const u8, _: *mut u8) {}

unsafe fn empty_drop(_: *mut u8) {}

fn empty_type_name() -> &'static str {
    "EMPTY"
}
