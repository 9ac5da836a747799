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

const DEFAULT_LIMIT: u16 = 10;
const MAX_LIMIT: u16 = 1024;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QueryPaging {
    pub offset: Option<u64>,
    pub limit: Option<u16>,
}

impl QueryPaging {
    pub fn offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> u16 {
        self.limit
            .map(|l| if l > MAX_LIMIT { MAX_LIMIT } else { l })
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// Query parameters that pick the record shown in a screen's edit form, and narrow the
/// listing where the screen supports it.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QuerySelection {
    pub id: Option<i64>,
    pub product_id: Option<i64>,
    pub product_type: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults_and_cap() {
        let paging = QueryPaging::default();
        assert_eq!(paging.offset(), 0);
        assert_eq!(paging.limit(), 10);

        let paging = QueryPaging {
            offset: Some(30),
            limit: Some(5000),
        };
        assert_eq!(paging.offset(), 30);
        assert_eq!(paging.limit(), 1024);
    }
}
