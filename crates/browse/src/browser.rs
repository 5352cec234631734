use std::sync::Arc;

use futures::future::try_join_all;
use metflix_api::client::Client;
use metflix_types::{
    media::{MediaItem, Movie, TvShow},
    page::Page,
};
use tracing::debug;

use super::error::Error;
use super::window::{Window, WindowConfig, WindowPlan};

/// Catalog browsing facade over the upstream client.
///
/// The popular feeds are re-tiled into application-sized windows; the
/// remaining feeds pass the upstream page through unchanged. Windows
/// are recomputed on every call, never cached, so identical requests
/// always reflect the upstream's current ordering.
#[derive(Debug, Clone)]
pub struct Browser {
    http: Arc<Client>,
    cfg: WindowConfig,
}

impl Browser {
    pub fn new(http: Arc<Client>, cfg: Option<WindowConfig>) -> Self {
        Self {
            http,
            cfg: cfg.unwrap_or_default(),
        }
    }

    /// Popular movies, re-tiled to the application page size.
    ///
    /// The planned upstream pages are fetched concurrently and joined;
    /// any single failure discards the whole window.
    pub async fn popular_movies(&self, application_page: u32) -> Result<Window<MediaItem>, Error> {
        let plan = self.plan(application_page)?;
        debug!(
            "Movie window {} via upstream pages {}..{}",
            application_page,
            plan.first_upstream_page,
            plan.first_upstream_page + plan.pages_to_fetch - 1
        );
        let pages: Vec<Page<Movie>> = try_join_all(
            plan.upstream_pages()
                .map(|page| self.http.popular_movies(page)),
        )
        .await?
        .into_iter()
        .map(|page| (*page).clone())
        .collect();
        Ok(Window::assemble(&plan, self.cfg, pages).map(MediaItem::Movie))
    }

    /// Popular shows, re-tiled to the application page size.
    pub async fn popular_shows(&self, application_page: u32) -> Result<Window<MediaItem>, Error> {
        let plan = self.plan(application_page)?;
        debug!(
            "Show window {} via upstream pages {}..{}",
            application_page,
            plan.first_upstream_page,
            plan.first_upstream_page + plan.pages_to_fetch - 1
        );
        let pages: Vec<Page<TvShow>> = try_join_all(
            plan.upstream_pages()
                .map(|page| self.http.popular_shows(page)),
        )
        .await?
        .into_iter()
        .map(|page| (*page).clone())
        .collect();
        Ok(Window::assemble(&plan, self.cfg, pages).map(MediaItem::Tv))
    }

    pub async fn top_rated_movies(&self, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self.http.top_rated_movies(self.upstream_page(page)?).await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Movie))
    }

    pub async fn now_playing_movies(&self, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self
            .http
            .now_playing_movies(self.upstream_page(page)?)
            .await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Movie))
    }

    pub async fn upcoming_movies(&self, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self.http.upcoming_movies(self.upstream_page(page)?).await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Movie))
    }

    pub async fn top_rated_shows(&self, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self.http.top_rated_shows(self.upstream_page(page)?).await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Tv))
    }

    pub async fn on_the_air_shows(&self, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self.http.on_the_air_shows(self.upstream_page(page)?).await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Tv))
    }

    pub async fn airing_today_shows(&self, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self
            .http
            .airing_today_shows(self.upstream_page(page)?)
            .await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Tv))
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self
            .http
            .search_movies(query, self.upstream_page(page)?)
            .await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Movie))
    }

    pub async fn search_shows(&self, query: &str, page: u32) -> Result<Window<MediaItem>, Error> {
        let page = self
            .http
            .search_shows(query, self.upstream_page(page)?)
            .await?;
        Ok(Window::from_page((*page).clone()).map(MediaItem::Tv))
    }

    /// First page of movie and show results for one query, issued
    /// concurrently and concatenated movies-first.
    pub async fn search(&self, query: &str) -> Result<Vec<MediaItem>, Error> {
        let (movies, shows) = tokio::try_join!(
            self.http.search_movies(query, 1),
            self.http.search_shows(query, 1)
        )?;
        Ok(movies
            .results
            .iter()
            .cloned()
            .map(MediaItem::Movie)
            .chain(shows.results.iter().cloned().map(MediaItem::Tv))
            .collect())
    }

    fn plan(&self, application_page: u32) -> Result<WindowPlan, Error> {
        if application_page == 0 {
            return Err(Error::InvalidPage(application_page));
        }
        Ok(WindowPlan::for_page(application_page, self.cfg))
    }

    fn upstream_page(&self, page: u32) -> Result<u32, Error> {
        if page == 0 {
            return Err(Error::InvalidPage(page));
        }
        Ok(page)
    }
}
