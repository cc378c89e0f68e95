use std::ops::Deref;

use anyhow::Context;

use crate::{
    parser::{parse_search_results, YtHtmlDocument},
    types::VideoItem,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortBy {
    #[default]
    Views,
    Relevance,
    UploadDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DurationFilter {
    /// Under 4 minutes
    Short,
    /// 4 to 20 minutes
    Medium,
    /// Over 20 minutes
    Long,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub sort_by: SortBy,
    pub duration: Option<DurationFilter>,
}

impl SearchFilters {
    /// Value of the `sp` query parameter: a base64 protobuf that always
    /// restricts results to videos
    pub fn search_params(&self) -> &'static str {
        match (self.sort_by, self.duration) {
            (SortBy::Relevance, None) => "EgIQAQ==",
            (SortBy::Relevance, Some(DurationFilter::Short)) => "EgQQARgB",
            (SortBy::Relevance, Some(DurationFilter::Long)) => "EgQQARgC",
            (SortBy::Relevance, Some(DurationFilter::Medium)) => "EgQQARgD",
            (SortBy::UploadDate, None) => "CAISAhAB",
            (SortBy::UploadDate, Some(DurationFilter::Short)) => "CAISBBABGAE=",
            (SortBy::UploadDate, Some(DurationFilter::Long)) => "CAISBBABGAI=",
            (SortBy::UploadDate, Some(DurationFilter::Medium)) => "CAISBBABGAM=",
            (SortBy::Views, None) => "CAMSAhAB",
            (SortBy::Views, Some(DurationFilter::Short)) => "CAMSBBABGAE=",
            (SortBy::Views, Some(DurationFilter::Long)) => "CAMSBBABGAI=",
            (SortBy::Views, Some(DurationFilter::Medium)) => "CAMSBBABGAM=",
        }
    }
}

/// Scrapes the YouTube search results page
#[derive(Debug, Clone, Default)]
pub struct SearchScraper(pub reqwest::Client);

impl Deref for SearchScraper {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl SearchScraper {
    const SEARCH_URL: &str = "https://www.youtube.com/results";

    #[tracing::instrument(skip(self))]
    pub async fn fetch_results_page(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> anyhow::Result<YtHtmlDocument> {
        let html = self
            .get(Self::SEARCH_URL)
            .query(&[("search_query", query), ("sp", filters.search_params())])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(html.into())
    }

    /// Videos from the first page of results for `query`, in YouTube's order
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> anyhow::Result<Vec<VideoItem>> {
        // TODO: follow the continuation token to page past the first result page
        let doc = self
            .fetch_results_page(query, filters)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to fetch search results"))
            .context("Failed to fetch search results")?;

        let json = doc.to_json::<serde_json::Value>()?;
        let videos = parse_search_results(&json)?;
        tracing::info!(count = videos.len(), "Found videos");

        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_sort_by_views() {
        assert_eq!(SearchFilters::default().search_params(), "CAMSAhAB");
    }

    #[test]
    fn test_duration_filter_params() {
        let filters = SearchFilters {
            sort_by: SortBy::UploadDate,
            duration: Some(DurationFilter::Medium),
        };
        assert_eq!(filters.search_params(), "CAISBBABGAM=");

        let filters = SearchFilters {
            sort_by: SortBy::Relevance,
            duration: Some(DurationFilter::Short),
        };
        assert_eq!(filters.search_params(), "EgQQARgB");
    }
}
