pub mod crypto;
pub mod exchange;
pub mod extract;
pub mod fetch;

#[cfg(test)]
pub(crate) mod testing;
