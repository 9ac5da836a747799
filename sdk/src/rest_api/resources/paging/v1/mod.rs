// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::paging;

/// Paging links for a listing screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paging {
    current: String,
    offset: i64,
    limit: i64,
    total: i64,
    first: String,
    prev: String,
    next: Option<String>,
    last: String,
}

impl Paging {
    pub fn new(base_link: &str, paging: paging::Paging) -> Self {
        // Filtered screens pass a base link that already carries a query
        let separator = if base_link.contains('?') { '&' } else { '?' };
        let link = |offset: i64| {
            format!(
                "{}{}offset={}&limit={}",
                base_link, separator, offset, paging.limit
            )
        };

        let limit = paging.limit.max(1);
        let last_offset = if paging.total > 0 {
            ((paging.total - 1) / limit) * limit
        } else {
            0
        };

        Paging {
            current: link(paging.offset),
            first: link(0),
            prev: link((paging.offset - paging.limit).max(0)),
            next: paging.next_offset().map(link),
            last: link(last_offset),
            offset: paging.offset,
            limit: paging.limit,
            total: paging.total,
        }
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn total(&self) -> i64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_middle_page() {
        let paging = Paging::new("/operations/vehicles/", paging::Paging::new(10, 10, 35));

        assert_eq!(paging.current, "/operations/vehicles/?offset=10&limit=10");
        assert_eq!(paging.prev, "/operations/vehicles/?offset=0&limit=10");
        assert_eq!(paging.next(), Some("/operations/vehicles/?offset=20&limit=10"));
        assert_eq!(paging.last, "/operations/vehicles/?offset=30&limit=10");
    }

    #[test]
    fn test_links_keep_filter_query() {
        let paging = Paging::new(
            "/masters/product-master-detail/?product_id=4",
            paging::Paging::new(0, 10, 12),
        );

        assert_eq!(
            paging.next(),
            Some("/masters/product-master-detail/?product_id=4&offset=10&limit=10")
        );
    }

    #[test]
    fn test_links_single_page() {
        let paging = Paging::new("/masters/units/", paging::Paging::new(0, 10, 3));

        assert_eq!(paging.prev, "/masters/units/?offset=0&limit=10");
        assert_eq!(paging.next(), None);
        assert_eq!(paging.last, "/masters/units/?offset=0&limit=10");
        assert_eq!(paging.total(), 3);
    }

    #[test]
    fn test_links_empty_listing() {
        let paging = Paging::new("/masters/units/", paging::Paging::new(0, 10, 0));
        assert_eq!(paging.last, "/masters/units/?offset=0&limit=10");
        assert_eq!(paging.next(), None);
    }
}
