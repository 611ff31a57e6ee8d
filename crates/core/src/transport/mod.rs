//! Authenticated request transport helpers

pub mod interceptor;

pub use interceptor::ExpiredTokenInterceptor;
