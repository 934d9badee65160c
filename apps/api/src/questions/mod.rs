// Question bank: a pass-through to the managed backend that owns the data.
// Create, list, and delete only; there is no update.

pub mod handlers;
pub mod store;

#[cfg(test)]
pub mod testing;
