use core::fmt;
use std::any::Any;
use std::error::Error;
use std::sync::Arc;

/// A boxed error payload, as carried by [`Cause::Error`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Why a side, or a whole merge, stopped.
///
/// A `Cause` travels through receiver continuations, so it is cheap to clone:
/// error payloads are reference-counted.
///
/// # Examples
///
/// ```rust
/// use futures_wye::Cause;
///
/// let c = Cause::End.kill();
/// assert!(c.is_kill());
///
/// // Wrapping an already-killed cause changes nothing.
/// assert_eq!(c.clone().kill(), c);
/// ```
#[derive(Clone)]
pub enum Cause {
    /// Graceful completion.
    End,
    /// Externally requested termination, wrapping the cause it superseded.
    Kill(Box<Cause>),
    /// Unexpected failure carrying the underlying error.
    Error(Arc<BoxError>),
}

impl Cause {
    /// Create an error cause from any error value.
    pub fn error<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Cause::Error(Arc::new(err.into()))
    }

    /// Convert this cause into a kill.
    ///
    /// Kills are idempotent: a cause which is already a [`Cause::Kill`] is
    /// returned unchanged, so nested kills cannot be constructed.
    pub fn kill(self) -> Self {
        match self {
            kill @ Cause::Kill(_) => kill,
            other => Cause::Kill(Box::new(other)),
        }
    }

    /// Returns `true` if this is [`Cause::End`].
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Cause::End)
    }

    /// Returns `true` if this is [`Cause::Kill`].
    #[must_use]
    pub fn is_kill(&self) -> bool {
        matches!(self, Cause::Kill(_))
    }

    /// Returns `true` if this is [`Cause::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Cause::Error(_))
    }

    /// The error payload, if this cause carries one.
    pub fn as_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Cause::Error(err) => Some(err.as_ref().as_ref()),
            _ => None,
        }
    }

    /// Convert a caught panic payload into an error cause.
    ///
    /// String payloads keep their message; anything else is reported
    /// opaquely.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "panicked with a non-string payload".to_string()
        };
        Cause::error(Panicked { message })
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::End => f.write_str("End"),
            Cause::Kill(inner) => f.debug_tuple("Kill").field(inner).finish(),
            Cause::Error(err) => f.debug_tuple("Error").field(&format_args!("{}", err)).finish(),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::End => f.write_str("end of stream"),
            Cause::Kill(inner) => write!(f, "killed ({})", inner),
            Cause::Error(err) => write!(f, "{}", err),
        }
    }
}

impl Error for Cause {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Cause::End => None,
            Cause::Kill(inner) => Some(inner.as_ref()),
            Cause::Error(err) => Some(err.as_ref().as_ref()),
        }
    }
}

/// Error payloads compare by identity: two causes are equal when they carry
/// the same (reference-counted) error value.
impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cause::End, Cause::End) => true,
            (Cause::Kill(a), Cause::Kill(b)) => a == b,
            (Cause::Error(a), Cause::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Cause {}

/// The error stored when a receiver or combining function panics.
#[derive(Debug)]
struct Panicked {
    message: String,
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

impl Error for Panicked {}
