pub mod cluster;
pub mod error;
pub mod lj_direct_summation;
pub mod timing;
pub mod xyz;
