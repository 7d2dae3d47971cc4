use dpack_io::BackendError;

/// Codec result type
pub type Result<T> = core::result::Result<T, Error>;

/// An error returned by an [`Encoder`](crate::Encoder) or a [`Decoder`](crate::Decoder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The output buffer can't hold the encoded item
    #[error("not enough space left for message")]
    NotEnoughSpace,
    /// Allocating a decoded string or bin failed
    #[error("out of memory")]
    OutOfMemory,
    /// A tag doesn't parse as any known construct
    #[error("malformed message stream")]
    MalformedStream,
    /// A known construct this codec doesn't decode, e.g. an extension type
    #[error("unsupported message construct")]
    UnsupportedConstruct,
    /// A tag of a different type than the one requested
    #[error("unexpected message type")]
    WrongType,
    /// A count or a length outside of the requested bounds
    #[error("message size mismatch")]
    SizeMismatch,
    /// A scalar value outside of the requested bounds
    #[error("value out of range")]
    InvalidRange,
    /// The payload announced by a tag could not be fully consumed or isn't valid
    #[error("corrupted message payload")]
    CorruptPayload,
    /// No data left to decode
    #[error("no more data")]
    NoMoreData,
    /// An I/O backend failed
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(std::io::ErrorKind),
}

impl Error {
    /// Return the negative errno value matching this error.
    pub const fn errno(&self) -> i32 {
        const EIO: i32 = 5;
        const ENOMEM: i32 = 12;
        const ERANGE: i32 = 34;
        const ENOMSG: i32 = 42;
        const ENODATA: i32 = 61;
        const EPROTO: i32 = 71;
        const EBADMSG: i32 = 74;
        const EMSGSIZE: i32 = 90;
        const ENOTSUP: i32 = 95;
        match self {
            Error::NotEnoughSpace|Error::SizeMismatch => -EMSGSIZE,
            Error::OutOfMemory => -ENOMEM,
            Error::MalformedStream => -EPROTO,
            Error::UnsupportedConstruct => -ENOTSUP,
            Error::WrongType => -ENOMSG,
            Error::InvalidRange => -ERANGE,
            Error::CorruptPayload => -EBADMSG,
            Error::NoMoreData => -ENODATA,
            #[cfg(feature = "std")]
            Error::Io(_) => -EIO,
        }
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::BufferFull => Error::NotEnoughSpace,
            BackendError::NoData => Error::NoMoreData,
            #[cfg(feature = "std")]
            BackendError::Io(kind) => Error::Io(kind),
            #[allow(unreachable_patterns)]
            _ => Error::MalformedStream
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno() {
        assert_eq!(Error::SizeMismatch.errno(), -90);
        assert_eq!(Error::CorruptPayload.errno(), -74);
        assert_eq!(Error::WrongType.errno(), -42);
        assert_eq!(Error::from(BackendError::BufferFull), Error::NotEnoughSpace);
        assert_eq!(Error::from(BackendError::NoData), Error::NoMoreData);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_error_display() {
        use std::string::ToString;
        assert_eq!(Error::SizeMismatch.to_string(), "message size mismatch");
        assert_eq!(Error::Io(std::io::ErrorKind::BrokenPipe).to_string(), "i/o error: broken pipe");
    }
}
