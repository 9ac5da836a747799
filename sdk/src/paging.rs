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

/// Position of a page within a listing, as returned by the stores.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Paging {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

impl Paging {
    pub fn new(offset: i64, limit: i64, total: i64) -> Self {
        Paging {
            offset,
            limit,
            total,
        }
    }

    /// Offset of the following page, if any rows remain past this one.
    pub fn next_offset(&self) -> Option<i64> {
        let next = self.offset + self.limit;
        if next < self.total {
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_offset() {
        assert_eq!(Paging::new(0, 10, 25).next_offset(), Some(10));
        assert_eq!(Paging::new(20, 10, 25).next_offset(), None);
        assert_eq!(Paging::new(0, 10, 0).next_offset(), None);
    }
}
