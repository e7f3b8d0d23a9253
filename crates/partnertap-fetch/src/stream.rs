//! Day-windowed extraction stream.

use futures::stream::{Stream, try_unfold};
use partnertap_streams::{Normalizer, StreamName};
use partnertap_types::{
    AuthContext, Clock, DayWindows, ExtractionWindow, Result, TapError, Transaction,
    parse_start_date, utc_today,
};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

use crate::parse::parse_edges;
use crate::request::{DayRequest, auth_headers, endpoint_url, request_body};
use crate::Transport;

/// Pulls records one day window at a time through a [`Transport`].
///
/// The URL and headers are composed once from the [`AuthContext`] and reused
/// for every window of a run.
#[derive(Debug)]
pub struct Extractor<T> {
    transport: T,
    auth: AuthContext,
    url: String,
    headers: HeaderMap,
    clock: Clock,
    final_window: Mutex<Option<ExtractionWindow>>,
}

impl<T: Transport> Extractor<T> {
    /// Creates an extractor for the given organization.
    ///
    /// # Errors
    ///
    /// Returns [`TapError::Config`] if the access token cannot be used as a
    /// header value.
    pub fn new(transport: T, auth: AuthContext) -> Result<Self> {
        let url = endpoint_url(auth.organization_id());
        let headers = auth_headers(auth.access_token())?;
        Ok(Self {
            transport,
            auth,
            url,
            headers,
            clock: utc_today,
            final_window: Mutex::new(None),
        })
    }

    /// Replaces the source of the current UTC day.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the credentials this extractor was built with.
    #[must_use]
    pub const fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the last window of the most recently started run.
    ///
    /// `None` until a run has been polled, or when its range was empty.
    #[must_use]
    pub fn final_window(&self) -> Option<ExtractionWindow> {
        *self
            .final_window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Streams normalized transactions from `start_date` through today.
    ///
    /// # Errors
    ///
    /// Returns a configuration error, before any request is made, if
    /// `start_date` is missing, empty or malformed.
    pub fn transactions<'a>(
        &'a self,
        start_date: Option<&str>,
    ) -> Result<impl Stream<Item = Result<Transaction>> + use<'a, T>> {
        self.stream(StreamName::Transactions, start_date)
    }

    /// Streams the named stream from `start_date` through today.
    ///
    /// # Errors
    ///
    /// Returns [`TapError::UnknownStream`] for a name with no registry entry,
    /// and a configuration error if `start_date` is missing or malformed.
    pub fn stream_by_name<'a>(
        &'a self,
        name: &str,
        start_date: Option<&str>,
    ) -> Result<impl Stream<Item = Result<Transaction>> + use<'a, T>> {
        let stream: StreamName = name.parse()?;
        self.stream(stream, start_date)
    }

    /// Streams `stream` from `start_date` through today.
    ///
    /// The start date is validated here. "Today" is read from the clock on the
    /// first poll.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `start_date` is missing or malformed.
    pub fn stream<'a>(
        &'a self,
        stream: StreamName,
        start_date: Option<&str>,
    ) -> Result<impl Stream<Item = Result<Transaction>> + use<'a, T>> {
        let start_date = start_date
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| TapError::Config("The parameter start_date is required".to_string()))?;
        let start = ExtractionWindow::new(parse_start_date(start_date)?);
        Ok(self.unfold(stream, Range::Open(start)))
    }

    /// Streams `stream` over an explicit sequence of day windows.
    ///
    /// Windows are requested strictly one after another. Records of a window
    /// are normalized as they are pulled. The stream ends after the first
    /// error; records yielded before it stay valid.
    pub fn stream_windows(
        &self,
        stream: StreamName,
        windows: DayWindows,
    ) -> impl Stream<Item = Result<Transaction>> + '_ {
        self.unfold(stream, Range::Fixed(windows))
    }

    fn unfold(
        &self,
        stream: StreamName,
        range: Range,
    ) -> impl Stream<Item = Result<Transaction>> + '_ {
        let state = LoopState {
            range: Some(range),
            windows: None,
            current: None,
            emitted: 0,
        };
        let normalize = stream.normalizer();

        try_unfold(state, move |state| self.advance(stream, normalize, state))
    }

    /// Fixes the windows of a run. Called on its first poll.
    fn begin(&self, stream: StreamName, range: Range) -> DayWindows {
        let windows = match range {
            Range::Open(start) => DayWindows::until(start.date(), self.clock),
            Range::Fixed(windows) => windows,
        };

        info!(
            event_type = "extraction_start",
            stream = %stream,
            days = windows.len(),
            until = %windows.end(),
            "Retrieving records"
        );

        *self
            .final_window
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = windows.final_window();
        windows
    }

    /// Produces the next record, requesting further windows as needed.
    async fn advance(
        &self,
        stream: StreamName,
        normalize: Normalizer,
        mut state: LoopState,
    ) -> Result<Option<(Transaction, LoopState)>> {
        if let Some(range) = state.range.take() {
            state.windows = Some(self.begin(stream, range));
        }

        loop {
            let next = state
                .current
                .as_mut()
                .and_then(|(day, edges)| edges.next().map(|edge| normalize(day, &edge)));
            if let Some(record) = next {
                state.emitted += 1;
                return Ok(Some((record, state)));
            }

            let Some(window) = state.windows.as_mut().and_then(|w| w.next()) else {
                info!(
                    event_type = "extraction_complete",
                    stream = %stream,
                    records = state.emitted,
                    "Finished retrieving records"
                );
                return Ok(None);
            };

            let edges = self.fetch_window(stream, &window).await?;
            state.current = Some((window.day(), edges.into_iter()));
        }
    }

    /// Requests one window and returns its raw edges.
    ///
    /// # Errors
    ///
    /// Returns [`TapError::Transport`] if the request fails or the status is
    /// not 2xx, and [`TapError::ResponseShape`] for an unexpected body.
    pub async fn fetch_window(
        &self,
        stream: StreamName,
        window: &ExtractionWindow,
    ) -> Result<Vec<Value>> {
        let request = self.day_request(stream, window);

        debug!(
            event_type = "request_start",
            stream = %stream,
            day = %request.day,
            "Requesting day window"
        );

        let response = self
            .transport
            .send(&request)
            .await
            .map_err(|e| TapError::Transport {
                day: request.day.clone(),
                status: e.status(),
                message: e.to_string(),
            })?;

        let edges = parse_edges(&request.day, stream.edges_pointer(), &response)?;

        info!(
            event_type = "day_complete",
            stream = %stream,
            day = %request.day,
            records = edges.len(),
            "Fetched day window"
        );

        Ok(edges)
    }

    /// Composes the request for one window.
    #[must_use]
    pub fn day_request(&self, stream: StreamName, window: &ExtractionWindow) -> DayRequest {
        DayRequest {
            day: window.day(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: request_body(stream.query_template(), window),
        }
    }
}

/// Days a run covers, before its first poll.
enum Range {
    /// From a start day through the clock's day at the first poll.
    Open(ExtractionWindow),
    /// An explicit sequence of windows.
    Fixed(DayWindows),
}

/// Position of the extraction loop between polls.
struct LoopState {
    range: Option<Range>,
    windows: Option<DayWindows>,
    current: Option<(String, std::vec::IntoIter<Value>)>,
    emitted: usize,
}
