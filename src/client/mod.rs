pub mod error;
pub mod shortener;
pub mod transport;

pub use error::ClientError;
pub use shortener::ShortenerClient;
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError,
};
