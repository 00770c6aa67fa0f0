pub mod errors;
pub mod db;
pub mod perfume;

#[cfg(test)]
mod tests;
