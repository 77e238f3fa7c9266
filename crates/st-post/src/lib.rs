//! Post page data for spacetraveling.
//!
//! Everything a post route needs short of HTML:
//!
//! - [`enumerate_paths`]: slugs to pre-generate, plus the fallback policy
//! - [`load_post`]: a post and its previous/next neighbors
//! - [`PostMeta`]: reading time and formatted dates
//! - [`PageState`]: loading, loaded, or not found
//!
//! # Example
//!
//! ```ignore
//! use st_content::Revision;
//! use st_post::{PageState, PostMeta, SiteLocale, load_post};
//!
//! let page = load_post(&source, "post", "hello-world", &Revision::Published)?;
//! let state = PageState::from_load("hello-world", page);
//! if let PageState::Loaded(page) = &state {
//!     let meta = PostMeta::from_page(page, SiteLocale::EnUs);
//!     println!("{} min", meta.reading_minutes);
//! }
//! ```

mod dates;
mod loader;
mod paths;
mod reading_time;
mod state;
mod view;

pub use dates::{DateError, SiteLocale, format_human_date, format_time_of_day, parse_timestamp};
pub use loader::{PostPage, load_post};
pub use paths::{FallbackPolicy, PATHS_PAGE_SIZE, StaticPaths, enumerate_paths, post_route};
pub use reading_time::{WORDS_PER_MINUTE, count_words, estimate_reading_minutes};
pub use state::PageState;
pub use view::PostMeta;
