//! In-process fakes for the upstream seams, shared by unit tests

use async_trait::async_trait;
use research_llm::{CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::{
    DocumentFetcher, Filing, FilingSearch, FormType, InstantAnswer, InstantAnswerResult, NewsFeed,
    NewsItem,
};
use crate::error::{ResearchError, Result};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

/// News feed returning fixed headlines, or one headline echoing the query
pub struct FakeNewsFeed {
    items: Vec<NewsItem>,
    echo: bool,
    error: Option<String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl FakeNewsFeed {
    fn build(items: Vec<NewsItem>, echo: bool, error: Option<String>) -> Self {
        Self {
            items,
            echo,
            error,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_titles(titles: &[&str]) -> Self {
        let items = titles
            .iter()
            .enumerate()
            .map(|(i, title)| NewsItem {
                title: (*title).to_string(),
                link: format!("https://news.example.com/{i}"),
                published: None,
            })
            .collect();
        Self::build(items, false, None)
    }

    /// One item titled `headline: <query>`
    pub fn echo() -> Self {
        Self::build(Vec::new(), true, None)
    }

    pub fn failing(reason: &str) -> Self {
        Self::build(Vec::new(), false, Some(reason.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl NewsFeed for FakeNewsFeed {
    async fn search(&self, query: &str) -> Result<Vec<NewsItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.queries).push(query.to_string());

        if let Some(reason) = &self.error {
            return Err(ResearchError::Api(reason.clone()));
        }
        if self.echo {
            return Ok(vec![NewsItem {
                title: format!("headline: {query}"),
                link: "https://news.example.com/echo".to_string(),
                published: None,
            }]);
        }
        Ok(self.items.clone())
    }
}

enum FilingMode {
    Found,
    Fixed(Option<Filing>),
    Failing(String),
}

/// Filing search with call recording
pub struct FakeFilingSearch {
    mode: FilingMode,
    calls: AtomicUsize,
    tickers: Mutex<Vec<String>>,
    forms: Mutex<Vec<FormType>>,
}

impl FakeFilingSearch {
    fn build(mode: FilingMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            tickers: Mutex::new(Vec::new()),
            forms: Mutex::new(Vec::new()),
        }
    }

    /// A dated filing per form at `https://www.sec.gov/Archives/<ticker>-<form>.htm`
    pub fn found() -> Self {
        Self::build(FilingMode::Found)
    }

    pub fn none() -> Self {
        Self::build(FilingMode::Fixed(None))
    }

    pub fn returning(filing: Filing) -> Self {
        Self::build(FilingMode::Fixed(Some(filing)))
    }

    pub fn failing(reason: &str) -> Self {
        Self::build(FilingMode::Failing(reason.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tickers(&self) -> Vec<String> {
        lock(&self.tickers).clone()
    }

    pub fn forms(&self) -> Vec<FormType> {
        lock(&self.forms).clone()
    }
}

#[async_trait]
impl FilingSearch for FakeFilingSearch {
    async fn latest_filing(&self, ticker: &str, form: FormType) -> Result<Option<Filing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.tickers).push(ticker.to_string());
        lock(&self.forms).push(form);

        match &self.mode {
            FilingMode::Found => Ok(Some(Filing {
                form_type: form.to_string(),
                filed_at: Some("2024-08-02T16:30:00-04:00".to_string()),
                detail_url: Some(format!(
                    "https://www.sec.gov/Archives/{}-{form}.htm",
                    ticker.to_lowercase()
                )),
            })),
            FilingMode::Fixed(filing) => Ok(filing.clone()),
            FilingMode::Failing(reason) => Err(ResearchError::Api(reason.clone())),
        }
    }
}

/// Document fetcher serving one fixed page
pub struct FakeDocuments {
    html: Option<String>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl FakeDocuments {
    pub fn serving(html: String) -> Self {
        Self {
            html: Some(html),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            html: None,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        lock(&self.urls).clone()
    }
}

#[async_trait]
impl DocumentFetcher for FakeDocuments {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.urls).push(url.to_string());
        self.html
            .clone()
            .ok_or_else(|| ResearchError::Api(format!("403 Forbidden for {url}")))
    }
}

/// Instant-answer lookup with a fixed result
pub struct FakeInstantAnswer {
    result: Option<InstantAnswerResult>,
    calls: AtomicUsize,
}

impl FakeInstantAnswer {
    pub fn returning(result: InstantAnswerResult) -> Self {
        Self {
            result: Some(result),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::returning(InstantAnswerResult::default())
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InstantAnswer for FakeInstantAnswer {
    async fn lookup(&self, _query: &str) -> Result<InstantAnswerResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .ok_or_else(|| ResearchError::Api("instant answer unavailable".to_string()))
    }
}

/// Chat model with a canned reply or failure
pub struct FakeLlm {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl LLMProvider for FakeLlm {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> research_llm::Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.requests).push(request);

        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                message: Message::assistant(text.clone()),
                stop_reason: research_llm::StopReason::EndTurn,
                usage: research_llm::TokenUsage::default(),
            }),
            Err(reason) => Err(LLMError::RequestFailed(reason.clone())),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}
