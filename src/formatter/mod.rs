//! Listing formatters.
//!
//! Once items are ordered, hosts usually want to show the order before (or
//! instead of) running it. A [`ListFormatter`] receives one event when a
//! listing begins, one per item in execution order, and one when it ends.
//!
//! Every event comes with its own data struct. Formatters pick which type
//! they want to receive per event through the associated types, as long as it
//! can be built `From` the event data. Formatters that do not care about an
//! event use `()` and keep the default no-op method.
//!
//! Errors from a formatter never stop a listing. [`list`] collects them, each
//! tagged with the name of the event that failed.

use crate::item::TestItem;

pub mod no;
pub mod tree;

/// Data for [`ListFormatter::fmt_begin_listing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtBeginListing {
    pub items: usize,
}

/// Data for [`ListFormatter::fmt_list_item`].
#[derive(Debug)]
#[non_exhaustive]
pub struct FmtListItem<'t, T> {
    pub item: &'t T,
    pub position: usize,
}

/// Data for [`ListFormatter::fmt_end_listing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct FmtEndListing {
    pub items: usize,
}

pub trait ListFormatter<'t, T: 't> {
    type Error;

    type BeginListing: From<FmtBeginListing>;
    fn fmt_begin_listing(&mut self, data: Self::BeginListing) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type ListItem: From<FmtListItem<'t, T>>;
    fn fmt_list_item(&mut self, data: Self::ListItem) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    type EndListing: From<FmtEndListing>;
    fn fmt_end_listing(&mut self, data: Self::EndListing) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

/// A formatter error together with the event it happened in.
pub type FmtErrors<E> = Vec<(&'static str, E)>;

trait PushOnError<E> {
    fn push_on_error(&mut self, result: Result<(), (&'static str, E)>);
}

impl<E> PushOnError<E> for FmtErrors<E> {
    fn push_on_error(&mut self, result: Result<(), (&'static str, E)>) {
        if let Err(err) = result {
            self.push(err);
        }
    }
}

macro_rules! named_fmt {
    ($formatter:ident.$method:ident($data:expr)) => {
        $formatter
            .$method($data.into())
            .map_err(|err| (stringify!($method), err))
    };
}

/// Feed `items`, already in execution order, through `formatter`.
pub fn list<'t, T, F>(
    items: impl IntoIterator<Item = &'t T, IntoIter: ExactSizeIterator>,
    formatter: &mut F,
) -> FmtErrors<F::Error>
where
    T: 't,
    F: ListFormatter<'t, T>,
{
    let items = items.into_iter();
    let count = items.len();
    let mut fmt_errors = FmtErrors::new();

    fmt_errors.push_on_error(named_fmt!(
        formatter.fmt_begin_listing(FmtBeginListing { items: count })
    ));
    for (position, item) in items.enumerate() {
        fmt_errors.push_on_error(named_fmt!(
            formatter.fmt_list_item(FmtListItem { item, position })
        ));
    }
    fmt_errors.push_on_error(named_fmt!(
        formatter.fmt_end_listing(FmtEndListing { items: count })
    ));

    fmt_errors
}

/// The name of a test item, as shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ItemName<'t>(pub &'t str);

impl<'t> From<FmtListItem<'t, TestItem>> for ItemName<'t> {
    fn from(value: FmtListItem<'t, TestItem>) -> Self {
        Self(value.item.name.as_ref())
    }
}
