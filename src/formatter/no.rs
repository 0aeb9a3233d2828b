use crate::formatter::*;

/// A formatter that produces no output.
///
/// Useful when a host only needs the ordering and handles reporting itself.
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

macro_rules! impl_unit_from {
    [$($name:ident$(<$($generic:tt),*>)?),* $(,)?] => {$(
        impl$(<$($generic),*>)? From<$name$(<$($generic),*>)?> for () {
            fn from(_: $name$(<$($generic),*>)?) -> () {}
        })*
    };
}

impl_unit_from![FmtBeginListing, FmtListItem<'t, T>, FmtEndListing];

impl<'t, T: 't> ListFormatter<'t, T> for NoFormatter {
    type Error = ();
    type BeginListing = ();
    type ListItem = ();
    type EndListing = ();
}
