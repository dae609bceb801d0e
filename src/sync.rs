pub use debounce::Debounce;

pub mod debounce;
