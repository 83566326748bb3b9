/// Converts errors from their error type (of the submodule) to that of
/// a waymatch::Error variant, or of another submodule's error.
///
/// ```rust,ignore
/// use waymatch::route::RouteError;
/// waymatch::impl_err!(RouteError, Route);
/// waymatch::impl_err!(RouteError, MatchError, Route);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            $crate::impl_err!($from, $crate::Error, $variant);
        };
        ($from:ty, $to:ty, $variant:ident) => {
            impl From<$from> for $to {
                fn from(value: $from) -> Self {
                    <$to>::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
