//! Lifecycle container for one asynchronous fetch.
//!
//! An [`AsyncResource`] moves `Idle -> Loading -> Success | Failure` and back
//! to `Loading` on the next request. Data exists only in `Success` and an
//! error only in `Failure`; the enum layout makes any other combination
//! unrepresentable.
//!
//! Every [`request`](AsyncResource::request) hands out a [`RequestId`].
//! Completions must present the id of the latest request, so a response that
//! arrives after a newer request was issued is rejected as stale.
//!
//! # Example
//!
//! ```rust
//! use storefront::state::{AsyncResource, Status, TransitionError};
//!
//! let mut resource: AsyncResource<u32> = AsyncResource::new();
//! let first = resource.request();
//! let second = resource.request();
//!
//! assert_eq!(resource.succeed(first, 1), Err(TransitionError::Stale));
//! assert_eq!(resource.succeed(second, 2), Ok(()));
//! assert_eq!(resource.status(), Status::Success);
//! assert_eq!(resource.data(), Some(&2));
//! ```

use std::fmt;

use thiserror::Error;

use crate::error::StorefrontError;

/// Identifies one request issued against an [`AsyncResource`].
///
/// Ids are strictly increasing per resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four observable states of a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Success,
    /// The latest request failed.
    Failure,
}

/// Why a completion was not applied.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The resource is not loading, so there is nothing to complete.
    #[error("resource is not loading")]
    NotLoading,

    /// A newer request superseded this one.
    #[error("response belongs to a superseded request")]
    Stale,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase<T> {
    Idle,
    Loading,
    Success(T),
    Failure(StorefrontError),
}

/// Tracks the lifecycle of one fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsyncResource<T> {
    phase: Phase<T>,
    latest: u64,
}

impl<T> Default for AsyncResource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncResource<T> {
    /// Creates an idle resource.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            latest: 0,
        }
    }

    /// Starts a request and returns its id.
    ///
    /// Any previous data or error is dropped. Calling this while already
    /// loading keeps the `Loading` status but supersedes the in-flight
    /// request.
    pub fn request(&mut self) -> RequestId {
        self.latest += 1;
        self.phase = Phase::Loading;
        RequestId(self.latest)
    }

    /// Completes request `id` with data.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotLoading`] when no request is in flight and
    /// [`TransitionError::Stale`] when `id` is not the latest request. The
    /// resource is left untouched in both cases.
    pub fn succeed(&mut self, id: RequestId, data: T) -> Result<(), TransitionError> {
        self.check(id)?;
        self.phase = Phase::Success(data);
        Ok(())
    }

    /// Completes request `id` with an error.
    ///
    /// # Errors
    ///
    /// Same as [`succeed`](Self::succeed).
    pub fn fail(&mut self, id: RequestId, error: StorefrontError) -> Result<(), TransitionError> {
        self.check(id)?;
        self.phase = Phase::Failure(error);
        Ok(())
    }

    /// Completes request `id` from a result.
    ///
    /// # Errors
    ///
    /// Same as [`succeed`](Self::succeed).
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<T, StorefrontError>,
    ) -> Result<(), TransitionError> {
        match result {
            Ok(data) => self.succeed(id, data),
            Err(error) => self.fail(id, error),
        }
    }

    fn check(&self, id: RequestId) -> Result<(), TransitionError> {
        if !matches!(self.phase, Phase::Loading) {
            return Err(TransitionError::NotLoading);
        }
        if id.0 != self.latest {
            return Err(TransitionError::Stale);
        }
        Ok(())
    }

    /// Returns to `Idle`, invalidating any in-flight request.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.phase = Phase::Idle;
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self.phase {
            Phase::Idle => Status::Idle,
            Phase::Loading => Status::Loading,
            Phase::Success(_) => Status::Success,
            Phase::Failure(_) => Status::Failure,
        }
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Returns the data of a successful request.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match &self.phase {
            Phase::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Returns mutable access to the data of a successful request.
    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.phase {
            Phase::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the error of a failed request.
    #[must_use]
    pub const fn error(&self) -> Option<&StorefrontError> {
        match &self.phase {
            Phase::Failure(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error() -> StorefrontError {
        StorefrontError::api("boom")
    }

    fn assert_consistent<T>(resource: &AsyncResource<T>) {
        assert!(!(resource.data().is_some() && resource.error().is_some()));
        match resource.status() {
            Status::Idle | Status::Loading => {
                assert!(resource.data().is_none());
                assert!(resource.error().is_none());
            }
            Status::Success => assert!(resource.data().is_some()),
            Status::Failure => assert!(resource.error().is_some()),
        }
    }

    // === Transition Tests ===

    #[test]
    fn test_new_resource_is_idle() {
        let resource: AsyncResource<u32> = AsyncResource::default();

        assert_eq!(resource.status(), Status::Idle);
        assert_consistent(&resource);
    }

    #[test]
    fn test_request_then_succeed() {
        let mut resource = AsyncResource::new();
        let id = resource.request();
        assert!(resource.is_loading());

        resource.succeed(id, "data").unwrap();
        assert_eq!(resource.status(), Status::Success);
        assert_eq!(resource.data(), Some(&"data"));
        assert_consistent(&resource);
    }

    #[test]
    fn test_request_then_fail() {
        let mut resource: AsyncResource<u32> = AsyncResource::new();
        let id = resource.request();

        resource.fail(id, error()).unwrap();
        assert_eq!(resource.status(), Status::Failure);
        assert_eq!(resource.error(), Some(&error()));
        assert_consistent(&resource);
    }

    #[test]
    fn test_refetch_clears_previous_data_and_error() {
        let mut resource = AsyncResource::new();
        let id = resource.request();
        resource.succeed(id, 1).unwrap();

        let id = resource.request();
        assert_eq!(resource.status(), Status::Loading);
        assert_consistent(&resource);

        resource.fail(id, error()).unwrap();
        let id = resource.request();
        assert!(resource.error().is_none());
        resource.succeed(id, 2).unwrap();
        assert_eq!(resource.data(), Some(&2));
    }

    #[test]
    fn test_completion_while_idle_is_rejected() {
        let mut resource: AsyncResource<u32> = AsyncResource::new();
        let mut other: AsyncResource<u32> = AsyncResource::new();
        let foreign = other.request();

        assert_eq!(
            resource.succeed(foreign, 1),
            Err(TransitionError::NotLoading)
        );
        assert_eq!(resource.fail(foreign, error()), Err(TransitionError::NotLoading));
        assert_eq!(resource.status(), Status::Idle);
    }

    #[test]
    fn test_second_completion_is_rejected() {
        let mut resource = AsyncResource::new();
        let id = resource.request();
        resource.succeed(id, 1).unwrap();

        assert_eq!(resource.succeed(id, 2), Err(TransitionError::NotLoading));
        assert_eq!(resource.data(), Some(&1));
    }

    // === Stale Request Tests ===

    #[test]
    fn test_request_while_loading_supersedes_previous() {
        let mut resource = AsyncResource::new();
        let first = resource.request();
        let second = resource.request();
        assert!(second > first);

        assert_eq!(resource.succeed(first, 1), Err(TransitionError::Stale));
        assert!(resource.is_loading());

        resource.succeed(second, 2).unwrap();
        assert_eq!(resource.data(), Some(&2));
    }

    #[test]
    fn test_reset_invalidates_in_flight_request() {
        let mut resource = AsyncResource::new();
        let id = resource.request();
        resource.reset();

        assert_eq!(resource.succeed(id, 1), Err(TransitionError::NotLoading));
        let next = resource.request();
        assert_eq!(resource.succeed(id, 1), Err(TransitionError::Stale));
        resource.succeed(next, 2).unwrap();
        assert_eq!(resource.data(), Some(&2));
    }

    #[test]
    fn test_complete_dispatches_on_result() {
        let mut resource = AsyncResource::new();
        let id = resource.request();
        resource.complete(id, Ok(5)).unwrap();
        assert_eq!(resource.data(), Some(&5));

        let id = resource.request();
        resource.complete(id, Err(error())).unwrap();
        assert_eq!(resource.status(), Status::Failure);
    }

    #[test]
    fn test_data_mut_only_in_success() {
        let mut resource = AsyncResource::new();
        assert!(resource.data_mut().is_none());

        let id = resource.request();
        resource.succeed(id, vec![1]).unwrap();
        resource.data_mut().unwrap().push(2);
        assert_eq!(resource.data(), Some(&vec![1, 2]));
    }
}
