use std::{fmt::Display, future::Future};

/// A generative text capability: fixed instructions plus a document in,
/// free-form text out.
pub trait Generator {
    type Error: Display;

    fn generate(
        &self,
        instructions: &str,
        content: String,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
