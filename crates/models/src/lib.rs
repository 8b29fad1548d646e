pub mod errors;
pub mod db;
pub mod shared_link;

#[cfg(test)]
mod tests;
