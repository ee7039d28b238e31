//! `(page, search)` coordinate and its address-bar encoding.
//!
//! The coordinate is the only state mirrored in the URL and the only cache key
//! of the notes query. Canonical form omits every parameter that equals its
//! default, so the first page of an unfiltered list is plain `/notes`.

use leptos_router::params::ParamsMap;

/// Notes per page; part of every list request but never of the URL.
pub(crate) const PER_PAGE: u32 = 12;

pub(crate) const PAGE_PARAM: &str = "page";
pub(crate) const SEARCH_PARAM: &str = "search";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PageCoordinate {
    /// Always >= 1.
    pub page: u32,
    pub search: String,
}

impl Default for PageCoordinate {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
        }
    }
}

impl PageCoordinate {
    pub(crate) fn new(page: u32, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            search: search.into(),
        }
    }

    /// Derive a coordinate from the router's (already decoded) query map.
    pub(crate) fn from_params(params: &ParamsMap) -> Self {
        Self::from_lookup(|key| params.get_all(key).and_then(|v| v.into_iter().next()))
    }

    /// `lookup` yields the first decoded value of a query parameter.
    ///
    /// Missing, non-numeric, or zero `page` falls back to 1; missing `search`
    /// to the empty string. Unknown parameters are ignored.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let page = lookup(PAGE_PARAM)
            .and_then(|raw| parse_page(&raw))
            .unwrap_or(1);
        let search = lookup(SEARCH_PARAM).unwrap_or_default();

        Self::new(page, search)
    }

    /// Canonical query string without the leading `?`; empty for the defaults.
    pub(crate) fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(2);
        if self.page > 1 {
            parts.push(format!("{PAGE_PARAM}={}", self.page));
        }
        if !self.search.is_empty() {
            parts.push(format!(
                "{SEARCH_PARAM}={}",
                urlencoding::encode(&self.search)
            ));
        }
        parts.join("&")
    }

    /// `base` with the canonical query appended, e.g. `/notes?page=3&search=meeting`.
    pub(crate) fn href(&self, base: &str) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{qs}")
        }
    }

    /// Coordinate for a newly committed search term: pagination restarts
    /// from the first page.
    pub(crate) fn for_search(search: impl Into<String>) -> Self {
        Self::new(1, search)
    }

    pub(crate) fn with_page(&self, page: u32) -> Self {
        Self::new(page, self.search.clone())
    }
}

fn parse_page(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|p| *p >= 1)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_from_params_decodes_router_values() {
        let params: ParamsMap = [("search", "team%20sync"), ("page", "3"), ("page", "8")]
            .into_iter()
            .collect();
        assert_eq!(PageCoordinate::from_params(&params), PageCoordinate::new(3, "team sync"));
    }

    #[wasm_bindgen_test]
    fn test_from_params_round_trips_encoded_search() {
        let c = PageCoordinate::new(2, "a&b=c ü?");
        let qs = c.to_query_string();
        let params: ParamsMap = qs
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(PageCoordinate::from_params(&params), c);
    }
}
