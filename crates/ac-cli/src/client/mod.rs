pub(crate) mod error;
pub(crate) mod graphql_client;

pub use error::{ClientError, Result as CliClientResult};
pub use graphql_client::GraphqlClient;
