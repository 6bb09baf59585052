//! Paged iteration over Reddit listings.
//!
//! A [`Paginator`] walks a listing endpoint one page at a time, following the
//! `after` cursor Reddit hands back. Where it reads from is described by a
//! [`ListingTarget`]; how the listing is ordered by [`Sorting`] and
//! [`TimePeriod`]. Changing any of those discards the cached page, so the next
//! fetch always reflects the current settings.

use std::fmt;

use clap::ValueEnum;
use log::debug;

use crate::client::error::Result;
use crate::client::transport::HttpTransport;
use crate::config::DEFAULT_PAGE_LIMIT;
use crate::models::listing::Listing;
use crate::models::{MultiReddit, Submission, Thing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sorting {
    Hot,
    New,
    Rising,
    Top,
    Controversial,
    Best,
}

impl Sorting {
    /// The path segment Reddit expects, e.g. `top`.
    pub fn as_str(self) -> &'static str {
        match self {
            Sorting::Hot => "hot",
            Sorting::New => "new",
            Sorting::Rising => "rising",
            Sorting::Top => "top",
            Sorting::Controversial => "controversial",
            Sorting::Best => "best",
        }
    }

    /// Only these sortings accept a `t` parameter.
    pub fn takes_time_period(self) -> bool {
        matches!(self, Sorting::Top | Sorting::Controversial)
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimePeriod {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimePeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            TimePeriod::Hour => "hour",
            TimePeriod::Day => "day",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Year => "year",
            TimePeriod::All => "all",
        }
    }
}

/// The per-user listings under `/user/{name}/...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UserSection {
    Overview,
    Submitted,
    Comments,
    Upvoted,
    Downvoted,
    Saved,
    Hidden,
    Gilded,
}

impl UserSection {
    pub fn as_str(self) -> &'static str {
        match self {
            UserSection::Overview => "overview",
            UserSection::Submitted => "submitted",
            UserSection::Comments => "comments",
            UserSection::Upvoted => "upvoted",
            UserSection::Downvoted => "downvoted",
            UserSection::Saved => "saved",
            UserSection::Hidden => "hidden",
            UserSection::Gilded => "gilded",
        }
    }
}

/// What a paginator is iterating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingTarget {
    FrontPage,
    Subreddit(String),
    MultiReddit { path: String },
    User { username: String, section: UserSection },
}

impl ListingTarget {
    /// Resource path without the sorting segment and without a trailing slash.
    pub fn base_path(&self) -> String {
        let path = match self {
            ListingTarget::FrontPage => String::new(),
            ListingTarget::Subreddit(name) => {
                format!("/r/{}", name.trim_start_matches("r/"))
            }
            ListingTarget::MultiReddit { path } => path.clone(),
            ListingTarget::User { username, section } => format!(
                "/user/{}/{}",
                username.trim_start_matches("u/"),
                section.as_str()
            ),
        };
        path.trim_end_matches('/').to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    /// Nothing fetched since construction or the last invalidation.
    Fresh,
    HasPage,
    /// The last page had no `after` cursor.
    Exhausted,
}

pub struct Paginator<'a, T, C: ?Sized> {
    transport: &'a C,
    target: ListingTarget,
    multi_reddit: Option<MultiReddit>,
    sorting: Option<Sorting>,
    time_period: Option<TimePeriod>,
    limit: u32,
    current: Option<Listing<T>>,
    exhausted: bool,
    page_number: usize,
    seen: usize,
}

impl<'a, C: HttpTransport + ?Sized> Paginator<'a, Submission, C> {
    pub fn front_page(transport: &'a C) -> Self {
        Self::new(transport, ListingTarget::FrontPage)
    }

    pub fn subreddit(transport: &'a C, name: impl Into<String>) -> Self {
        Self::new(transport, ListingTarget::Subreddit(name.into()))
    }

    /// Iterate the posts of a multireddit.
    pub fn multireddit(transport: &'a C, multi: MultiReddit) -> Self {
        let mut paginator = Self::multireddit_path(transport, multi.path.clone());
        paginator.multi_reddit = Some(multi);
        paginator
    }

    /// Iterate the posts of the multireddit at `path`.
    pub fn multireddit_path(transport: &'a C, path: impl Into<String>) -> Self {
        Self::new(transport, ListingTarget::MultiReddit { path: path.into() })
    }
}

impl<'a, T: Thing, C: HttpTransport + ?Sized> Paginator<'a, T, C> {
    pub fn new(transport: &'a C, target: ListingTarget) -> Self {
        Self {
            transport,
            target,
            multi_reddit: None,
            sorting: None,
            time_period: None,
            limit: DEFAULT_PAGE_LIMIT,
            current: None,
            exhausted: false,
            page_number: 0,
            seen: 0,
        }
    }

    /// Iterate one of a user's listings. Pick `T` to match the section:
    /// `Comment` for comments, `Submission` for submitted, `RedditObject` for
    /// the mixed ones.
    pub fn user(transport: &'a C, username: impl Into<String>, section: UserSection) -> Self {
        Self::new(
            transport,
            ListingTarget::User {
                username: username.into(),
                section,
            },
        )
    }

    pub fn with_sorting(mut self, sorting: Sorting) -> Self {
        self.set_sorting(Some(sorting));
        self
    }

    pub fn with_time_period(mut self, period: TimePeriod) -> Self {
        self.set_time_period(Some(period));
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.set_limit(limit);
        self
    }

    pub fn state(&self) -> PaginatorState {
        if self.exhausted {
            PaginatorState::Exhausted
        } else if self.current.is_some() {
            PaginatorState::HasPage
        } else {
            PaginatorState::Fresh
        }
    }

    pub fn target(&self) -> &ListingTarget {
        &self.target
    }

    /// The multireddit being iterated, when one was supplied as an object.
    pub fn multi_reddit(&self) -> Option<&MultiReddit> {
        self.multi_reddit.as_ref()
    }

    pub fn sorting(&self) -> Option<Sorting> {
        self.sorting
    }

    pub fn time_period(&self) -> Option<TimePeriod> {
        self.time_period
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The last page fetched under the current settings.
    pub fn current(&self) -> Option<&Listing<T>> {
        self.current.as_ref()
    }

    /// Number of pages fetched since the last invalidation.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn has_next(&self) -> bool {
        match self.state() {
            PaginatorState::Fresh => true,
            PaginatorState::HasPage => self.current.as_ref().is_some_and(Listing::has_next),
            PaginatorState::Exhausted => false,
        }
    }

    pub fn set_sorting(&mut self, sorting: Option<Sorting>) {
        self.sorting = sorting;
        self.invalidate();
    }

    pub fn set_time_period(&mut self, period: Option<TimePeriod>) {
        self.time_period = period;
        self.invalidate();
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
        self.invalidate();
    }

    pub fn set_target(&mut self, target: ListingTarget) {
        self.target = target;
        self.multi_reddit = None;
        self.invalidate();
    }

    /// Switch to another multireddit.
    pub fn set_multireddit(&mut self, multi: MultiReddit) {
        self.target = ListingTarget::MultiReddit {
            path: multi.path.clone(),
        };
        self.multi_reddit = Some(multi);
        self.invalidate();
    }

    /// Switch to the multireddit at `path`.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.set_target(ListingTarget::MultiReddit { path: path.into() });
    }

    /// Drop the cached page and cursor; the next fetch starts from the top.
    pub fn invalidate(&mut self) {
        if self.current.is_some() || self.exhausted {
            debug!("Invalidating paginator for {}", self.target.base_path());
        }
        self.current = None;
        self.exhausted = false;
        self.page_number = 0;
        self.seen = 0;
    }

    /// Base path plus the sorting segment.
    pub fn request_path(&self) -> String {
        let mut path = self.target.base_path();
        if let Some(sorting) = self.sorting {
            path.push('/');
            path.push_str(sorting.as_str());
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    fn request_query(&self, after: Option<&str>) -> Vec<(String, String)> {
        let mut query = vec![("limit".to_string(), self.limit.to_string())];

        if let Some(after) = after {
            query.push(("after".to_string(), after.to_string()));
            query.push(("count".to_string(), self.seen.to_string()));
        }

        if let (Some(sorting), Some(period)) = (self.sorting, self.time_period) {
            if sorting.takes_time_period() {
                query.push(("t".to_string(), period.as_str().to_string()));
            }
        }

        query
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<&Listing<T>>> {
        let after = match self.state() {
            PaginatorState::Exhausted => return Ok(None),
            PaginatorState::Fresh => None,
            PaginatorState::HasPage => match self.current.as_ref().and_then(|l| l.after.clone()) {
                Some(after) => Some(after),
                None => {
                    debug!(
                        "No more pages for {} after {} page(s)",
                        self.request_path(),
                        self.page_number
                    );
                    self.exhausted = true;
                    return Ok(None);
                }
            },
        };

        let path = self.request_path();
        let query = self.request_query(after.as_deref());
        debug!("Fetching page {} of {}", self.page_number + 1, path);

        let response = self.transport.get(&path, &query).await?.error_for_api()?;
        let listing = response.as_listing::<T>()?;

        self.page_number += 1;
        self.seen += listing.len();
        self.current = Some(listing);
        Ok(self.current.as_ref())
    }

    /// Fetch up to `max_pages` pages, stopping early when exhausted.
    pub async fn accumulate(&mut self, max_pages: usize) -> Result<Vec<Listing<T>>>
    where
        T: Clone,
    {
        let mut pages = Vec::new();
        while pages.len() < max_pages {
            match self.next_page().await? {
                Some(page) => pages.push(page.clone()),
                None => break,
            }
        }
        Ok(pages)
    }

    /// Like [`accumulate`](Self::accumulate), flattened into one list.
    pub async fn accumulate_merged(&mut self, max_pages: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        Ok(self
            .accumulate(max_pages)
            .await?
            .into_iter()
            .flat_map(Listing::into_children)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_paths() {
        assert_eq!(ListingTarget::FrontPage.base_path(), "");
        assert_eq!(
            ListingTarget::Subreddit("r/rust".to_string()).base_path(),
            "/r/rust"
        );
        assert_eq!(
            ListingTarget::MultiReddit {
                path: "/user/kn0thing/m/rising/".to_string()
            }
            .base_path(),
            "/user/kn0thing/m/rising"
        );
        assert_eq!(
            ListingTarget::User {
                username: "u/spez".to_string(),
                section: UserSection::Comments
            }
            .base_path(),
            "/user/spez/comments"
        );
    }

    #[test]
    fn sorting_segments_are_lower_case() {
        let names: Vec<&str> = Sorting::value_variants()
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["hot", "new", "rising", "top", "controversial", "best"]
        );
        assert!(Sorting::Top.takes_time_period());
        assert!(!Sorting::Hot.takes_time_period());
    }
}
