#[cfg(test)]
mod connection;
pub(crate) mod mocks;
#[cfg(test)]
mod response;
