pub mod access;
pub mod health;
pub mod stripe_connect;

#[cfg(test)]
mod tests;
