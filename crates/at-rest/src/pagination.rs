//! Lazy record stream over paginated list calls.

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;

use busbar_at_client::{Error, Result};

use crate::query::ListRecordsOptions;
use crate::record::Record;
use crate::table::Table;

/// Stream of records produced by [`Table::iter_records`].
///
/// Pages are fetched only when the consumer polls past the last buffered
/// record. Dropping the stream stops all further requests. The first error
/// is yielded and ends the stream.
pub type RecordStream<F> = BoxStream<'static, Result<Record<F>>>;

enum PageState {
    Fetch(Option<String>),
    Done,
}

pub(crate) fn record_stream<F>(table: Table<F>, options: ListRecordsOptions) -> RecordStream<F>
where
    F: DeserializeOwned + Send + 'static,
{
    let pages = stream::try_unfold(PageState::Fetch(None), move |state| {
        fetch_page(table.clone(), options.clone(), state)
    });

    pages
        .map_ok(|records| stream::iter(records.into_iter().map(Ok::<_, Error>)))
        .try_flatten()
        .boxed()
}

async fn fetch_page<F: DeserializeOwned>(
    table: Table<F>,
    mut options: ListRecordsOptions,
    state: PageState,
) -> Result<Option<(Vec<Record<F>>, PageState)>> {
    let offset = match state {
        PageState::Fetch(offset) => offset,
        PageState::Done => return Ok(None),
    };
    options.offset = offset;

    let (records, next) = table.list_records(&options).await?;
    let state = match next {
        Some(offset) => PageState::Fetch(Some(offset)),
        None => PageState::Done,
    };
    Ok(Some((records, state)))
}
