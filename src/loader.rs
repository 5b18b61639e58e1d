//! Sequential loading of further listing pages
//!
//! The origin page is page 1 and is already in the listing. A session fetches
//! pages 2, 3, ... one at a time, merges their cards into the listing and
//! stops on the first of: the page limit, a page without cards, a non-success
//! response, or a transport failure. A page without cards is the only
//! reliable end-of-results signal; the site's pagination block only ever
//! shows a small window of page links.

use futures::future::BoxFuture;
use futures::FutureExt;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

use crate::config::SuiteConfig;
use crate::item::{page_items, Listing};
use crate::progress::{Progress, ProgressObserver};
use crate::Result;

static PAGE_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/page/\d+/").unwrap());

/// How many extra pages a session may load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    Unbounded,
    Pages(u32),
}

impl PageLimit {
    /// Page-limit control value: a number of pages, anything else is unbounded
    pub fn parse(value: &str) -> Self {
        value
            .trim()
            .parse::<u32>()
            .map(PageLimit::Pages)
            .unwrap_or(PageLimit::Unbounded)
    }

    pub fn finite(&self) -> Option<u32> {
        match self {
            PageLimit::Pages(n) => Some(*n),
            PageLimit::Unbounded => None,
        }
    }

    /// Effective page count, using `unbounded_cap` for "all"
    pub fn cap(&self, unbounded_cap: u32) -> u32 {
        self.finite().unwrap_or(unbounded_cap)
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    LimitReached,
    /// A fetched page had no cards
    Exhausted,
    FetchNotOk { status: u16 },
    FetchError,
}

impl TerminationCause {
    /// Stopped by a network fault rather than by running out of pages
    pub fn is_fault(&self) -> bool {
        matches!(self, TerminationCause::FetchNotOk { .. } | TerminationCause::FetchError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed(TerminationCause),
    Aborted(TerminationCause),
}

/// Raw response of one page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches one listing page. Errors are transport-level failures only;
/// HTTP error statuses come back as a `FetchedPage`.
pub trait PageTransport {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<FetchedPage>>;
}

/// reqwest-backed transport sharing cookies across requests
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &SuiteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl PageTransport for HttpTransport {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<FetchedPage>> {
        async move {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            let body = if status.is_success() {
                response.text().await?
            } else {
                String::new()
            };
            Ok(FetchedPage {
                status: status.as_u16(),
                body,
            })
        }
        .boxed()
    }
}

/// URL of listing page `page`, derived from the page currently shown.
///
/// An existing `/page/N/` segment is replaced; otherwise one is appended to
/// the path. The query string is kept and the fragment dropped.
pub fn page_url(current: &Url, page: u32) -> Url {
    let path = current.path();
    let new_path = if PAGE_SEGMENT.is_match(path) {
        PAGE_SEGMENT
            .replace(path, format!("/page/{page}/").as_str())
            .into_owned()
    } else {
        let base = path.strip_suffix('/').unwrap_or(path);
        format!("{base}/page/{page}/")
    };

    let mut url = current.clone();
    url.set_path(&new_path);
    url.set_fragment(None);
    url
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub loaded: u32,
    pub items_added: usize,
    pub cause: TerminationCause,
    pub requested: Vec<Url>,
}

/// One "load pages" run
pub struct AggregationSession<'a, T> {
    transport: &'a T,
    origin: Url,
    limit: PageLimit,
    unbounded_cap: u32,
    delay: Duration,
    state: SessionState,
    next_page: u32,
    loaded: u32,
    items_added: usize,
    requested: Vec<Url>,
}

impl<'a, T: PageTransport> AggregationSession<'a, T> {
    pub fn new(transport: &'a T, origin: Url, limit: PageLimit, config: &SuiteConfig) -> Self {
        Self {
            transport,
            origin,
            limit,
            unbounded_cap: config.unbounded_page_cap,
            delay: config.page_delay(),
            state: SessionState::Idle,
            next_page: 2,
            loaded: 0,
            items_added: 0,
            requested: vec![],
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    /// Fetch and merge pages until a termination cause is hit.
    ///
    /// Cards merged before a failure stay in the listing.
    pub async fn run(
        &mut self,
        listing: &mut Listing,
        observer: &mut dyn ProgressObserver,
    ) -> SessionReport {
        self.state = SessionState::Running;
        observer.on_progress(&Progress::Started { limit: self.limit });

        let cap = self.limit.cap(self.unbounded_cap);
        let cause = loop {
            if self.loaded >= cap {
                break TerminationCause::LimitReached;
            }

            let page = self.next_page;
            self.next_page += 1;
            let url = page_url(&self.origin, page);
            self.requested.push(url.clone());
            tracing::debug!(%url, page, "fetching listing page");

            let fetched = match self.transport.fetch(&url).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "fetch failed");
                    break TerminationCause::FetchError;
                }
            };
            if !fetched.is_success() {
                tracing::info!(%url, status = fetched.status, "page fetch not ok");
                break TerminationCause::FetchNotOk {
                    status: fetched.status,
                };
            }

            let items = page_items(&fetched.body);
            if items.is_empty() {
                tracing::debug!(%url, "page has no items, end of listing");
                break TerminationCause::Exhausted;
            }

            self.items_added += items.len();
            listing.append(items);
            self.loaded += 1;
            observer.on_progress(&Progress::PageLoaded {
                loaded: self.loaded,
                limit: self.limit,
            });

            tokio::time::sleep(self.delay).await;
        };

        self.state = if cause.is_fault() {
            SessionState::Aborted(cause)
        } else {
            SessionState::Completed(cause)
        };
        observer.on_progress(&Progress::Finished {
            loaded: self.loaded,
            cause,
        });
        tracing::info!(loaded = self.loaded, items = self.items_added, ?cause, "page loading finished");

        SessionReport {
            loaded: self.loaded,
            items_added: self.items_added,
            cause,
            requested: self.requested.clone(),
        }
    }
}

/// Disabled-button guard against starting a second session
#[derive(Debug, Default)]
pub struct LoadTrigger {
    disabled: AtomicBool,
}

impl LoadTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled.load(Ordering::Acquire)
    }

    /// Disable the trigger until the returned guard drops; `None` if already disabled
    pub fn try_acquire(&self) -> Option<TriggerGuard<'_>> {
        self.disabled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TriggerGuard { trigger: self })
    }
}

pub struct TriggerGuard<'a> {
    trigger: &'a LoadTrigger,
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.trigger.disabled.store(false, Ordering::Release);
    }
}
