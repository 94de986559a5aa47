pub mod maxima_client;

pub use maxima_client::MaximaClient;
