//! Paged punch retrieval.
//!
//! Punch tables are the only unbounded tables the engine reads, so
//! retrieval goes through a dedicated pager: a lazy, finite, restartable
//! sequence of pages filtered to a date range, with a hard safety
//! ceiling on the total number of punches retrieved. Pages are fetched
//! strictly in offset order; later pages depend on the store's
//! pagination cursor.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::PagingConfig;
use crate::error::EngineResult;
use crate::store::{Filter, Page, Record, RecordStore};

/// A restartable source of punch pages for one date range.
///
/// The filter compares `punch_in_time` against date-only bounds, so any
/// time component on the stored value is ignored.
pub struct PunchPager<'a> {
    store: &'a dyn RecordStore,
    table: &'a str,
    filter: Filter,
    paging: PagingConfig,
}

/// Everything retrieved by one full run of the pager.
#[derive(Debug, Clone)]
pub struct RetrievedPunches {
    /// The retrieved punch records, in store order.
    pub records: Vec<Record>,
    /// True when paging stopped at the safety ceiling with pages left.
    pub ceiling_reached: bool,
}

impl<'a> PunchPager<'a> {
    /// Creates a pager over `table` for the inclusive date range.
    pub fn new(
        store: &'a dyn RecordStore,
        table: &'a str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        paging: PagingConfig,
    ) -> Self {
        // Date-only bounds: strip any time component before filtering.
        let filter = Filter::new().range(
            "punch_in_time",
            start_date.to_string(),
            end_date.to_string(),
        );
        Self {
            store,
            table,
            filter,
            paging,
        }
    }

    /// Starts a fresh pass over the pages.
    pub fn pages(&self) -> Pages<'_> {
        Pages {
            pager: self,
            offset: 0,
            retrieved: 0,
            ceiling_reached: false,
            done: false,
        }
    }

    /// Drains the pager into memory.
    ///
    /// A store error on any page is fatal to the whole retrieval. Hitting
    /// the safety ceiling keeps what was fetched and sets the flag.
    pub fn fetch_all(&self) -> EngineResult<RetrievedPunches> {
        let mut records = Vec::new();
        let mut pages = self.pages();
        while let Some(page) = pages.next() {
            records.extend(page?);
            debug!(table = self.table, total = records.len(), "fetched punch page");
        }
        if pages.ceiling_reached() {
            warn!(
                table = self.table,
                retrieved = records.len(),
                ceiling = self.paging.max_punches,
                "punch retrieval stopped at safety ceiling"
            );
        }
        Ok(RetrievedPunches {
            records,
            ceiling_reached: pages.ceiling_reached(),
        })
    }

    /// The ceiling this pager stops at.
    pub fn ceiling(&self) -> usize {
        self.paging.max_punches
    }
}

/// One pass over a [`PunchPager`]'s pages.
pub struct Pages<'p> {
    pager: &'p PunchPager<'p>,
    offset: usize,
    retrieved: usize,
    ceiling_reached: bool,
    done: bool,
}

impl Pages<'_> {
    /// True when the pass stopped at the safety ceiling rather than at
    /// the end of the listing.
    pub fn ceiling_reached(&self) -> bool {
        self.ceiling_reached
    }
}

impl Iterator for Pages<'_> {
    type Item = EngineResult<Vec<Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let page = match self.pager.store.list_records(
            self.pager.table,
            &self.pager.filter,
            Page::new(self.pager.paging.page_size, self.offset),
        ) {
            Ok(page) => page,
            Err(err) => {
                self.done = true;
                return Some(Err(err));
            }
        };

        if page.records.is_empty() {
            self.done = true;
            return None;
        }

        self.offset += self.pager.paging.page_size;
        self.retrieved += page.records.len();

        if !page.has_more {
            self.done = true;
        } else if self.retrieved >= self.pager.paging.max_punches {
            self.done = true;
            self.ceiling_reached = true;
        }

        Some(Ok(page.records))
    }
}
