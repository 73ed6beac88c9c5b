
use crate::thunk::Thunk;

/// A tuple of arguments that can be bound to a function of matching arity,
/// producing a nullary [`Thunk`].
///
/// Implemented for tuples of up to four `Clone + 'static` elements. Each call
/// of the resulting thunk passes fresh clones of the bound arguments, so the
/// bound function may take them by value.
pub trait BindArgs<F>: Sized {
    /// Bind `self` to `f`.
    fn bind_into<const N: usize, A>(self, f: F) -> Thunk<N, A>;
}

macro_rules! impl_bind_args {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> BindArgs<F> for ($($arg,)*)
        where
            F: FnMut($($arg),*) -> R + Clone + 'static,
            $($arg: Clone + 'static,)*
        {
            #[allow(non_snake_case)]
            fn bind_into<const N: usize, A>(self, mut f: F) -> Thunk<N, A> {
                let ($($arg,)*) = self;
                Thunk::from_callable(move || f($($arg.clone()),*))
            }
        }
    };
}

impl_bind_args!();
impl_bind_args!(T0);
impl_bind_args!(T0, T1);
impl_bind_args!(T0, T1, T2);
impl_bind_args!(T0, T1, T2, T3);

/// Bind `args` to `f`, producing a thunk that calls `f(args...)`.
///
/// The closure holding `f` and the arguments is subject to the same
/// capacity rule as [`Thunk::from_callable`].
///
/// ```
/// use inline_thunk::{bind, Thunk};
/// use std::{cell::Cell, rc::Rc};
///
/// fn add_to(total: Rc<Cell<u32>>, amount: u32) {
///     total.set(total.get() + amount);
/// }
///
/// let total = Rc::new(Cell::new(0));
/// let mut thunk: Thunk<32> = bind(add_to, (Rc::clone(&total), 5u32));
/// thunk.call();
/// thunk.call();
/// assert_eq!(total.get(), 10);
/// ```
pub fn bind<const N: usize, A, F, B>(f: F, args: B) -> Thunk<N, A>
where
    B: BindArgs<F>,
{
    args.bind_into(f)
}
