//! The application seam.

use hypatia_core::{SpecRequest, SpecResponse, SpecResult};

use crate::spec::Spec;

/// An application that can answer synthetic in-process requests.
///
/// Implementors drive a request through their handler pipeline without any
/// network I/O and return the resulting response. The bundled
/// [`Harness`](crate::Harness) adapts a plain handler function; framework
/// adapters implement this over their embedded execution entry point.
///
/// The harness never manages the application's lifecycle: a spec borrows
/// the application for the duration of one run, and starting or stopping
/// it is the caller's responsibility.
pub trait Testable {
    /// Drives one request through the application.
    ///
    /// An `Err` means the application itself failed to produce a response;
    /// it propagates out of the spec run unrecovered.
    fn handle(
        &self,
        request: SpecRequest,
    ) -> impl std::future::Future<Output = SpecResult<SpecResponse>> + Send;

    /// Creates a new empty spec bound to this application.
    ///
    /// `name` labels failure reports only; it has no effect on the request.
    fn spec(&self, name: impl Into<String>) -> Spec<'_, Self>
    where
        Self: Sized,
    {
        Spec::new(self, name)
    }
}
