#![doc = include_str!("../README.md")]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]


mod storage;
mod vtable;
mod thunk;
mod bind;

pub use self::{
    storage::{Storage, MaxAlign, Align8, Align32, Align64},
    thunk::Thunk,
    bind::{BindArgs, bind},
};

use static_assertions::{assert_eq_size, assert_not_impl_any, const_assert_eq};

const_assert_eq!(core::mem::align_of::<MaxAlign>(), 16);
const_assert_eq!(<Storage<32>>::ALIGN, 16);
assert_eq_size!(Storage<32>, [u8; 32]);
assert_eq_size!(Storage<0>, ());
assert_not_impl_any!(Thunk<32>: Send, Sync);
