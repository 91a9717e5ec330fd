pub mod shorten;

pub use shorten::ShortenRequest;
