// Tolerant JSON decoding helpers shared by the capability model and the
// domain models built on top of this crate.
//
// Routers from different vendors disagree on key capitalization and on
// whether numbers are sent as numbers or as strings.

pub mod fields;
pub mod flexible;

pub use fields::Fields;
