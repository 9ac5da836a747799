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

//! Landing screens: a grid of tiles linking to each screen of a module.

pub const MASTERS_DASHBOARD: &str = "/masters/";
pub const OPERATIONS_DASHBOARD: &str = "/operations/";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileSlice {
    pub title: String,
    pub icon: String,
    pub url: String,
}

impl TileSlice {
    fn new(title: &str, icon: &str, url: &str) -> Self {
        TileSlice {
            title: title.to_string(),
            icon: format!("img/{}.png", icon),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSlice {
    pub row1: Vec<TileSlice>,
    pub row2: Vec<TileSlice>,
}

pub fn master_dashboard() -> DashboardSlice {
    DashboardSlice {
        row1: vec![
            TileSlice::new("Department", "master_department", "/masters/departments/"),
            TileSlice::new(
                "Designation",
                "master_designation",
                "/masters/employee-master/",
            ),
            TileSlice::new(
                "Employee Master",
                "master_employee",
                "/masters/employee-master/",
            ),
            TileSlice::new("Unit Master", "master_unit", "/masters/units/"),
            TileSlice::new(
                "Master Product",
                "master_product",
                "/operations/master-products/",
            ),
            TileSlice::new(
                "Product Master",
                "master_product_master",
                "/masters/product-master/",
            ),
        ],
        row2: vec![
            TileSlice::new(
                "Terms and Conditions",
                "master_terms",
                "/masters/terms-conditions/",
            ),
            TileSlice::new("Add New Customer", "master_customer", "/masters/customers/"),
            TileSlice::new("Product BOM", "master_bom", "/masters/product-bom/"),
            TileSlice::new(
                "Product Development",
                "master_development",
                "/masters/product-development/",
            ),
        ],
    }
}

pub fn operation_dashboard() -> DashboardSlice {
    let mut tiles = vec![
        TileSlice::new("CREATE ORDER", "create_order", "/operations/create-order/"),
        TileSlice::new(
            "ADMIN-ACCOUNTS CLEARANCE",
            "admin_accounts_clearance",
            "/operations/payments/",
        ),
        TileSlice::new(
            "PM-ORDER ACCEPTANCE",
            "pm_order_acceptance",
            "/operations/factory-status/",
        ),
        TileSlice::new(
            "PM-PREPARE BATCH CHART",
            "pm_prepare_batch_chart",
            "/operations/bom-production/",
        ),
        TileSlice::new(
            "DISPATCH PLANNING",
            "dispatch_planning",
            "/operations/dispatch-order/",
        ),
        TileSlice::new(
            "PM-MATERIAL INWORD",
            "pm_material_inword",
            "/operations/material-inward/",
        ),
        TileSlice::new("PM-SPLIT ORDER", "pm_split_order", "/operations/split-order/"),
        TileSlice::new(
            "ADMIN-MATERIAL DISCARD",
            "admin_material_discard",
            "/operations/material-discard/",
        ),
        TileSlice::new(
            "PM-RETURN INWORD",
            "pm_return_inword",
            "/operations/material-inward-back/",
        ),
        TileSlice::new("UPDATE PRODUCT", "update_product", "/operations/update-products/"),
    ];
    let row2 = tiles.split_off(6);

    DashboardSlice { row1: tiles, row2 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_dashboard_rows() {
        let dashboard = master_dashboard();
        assert_eq!(dashboard.row1.len(), 6);
        assert_eq!(dashboard.row2.len(), 4);
        assert_eq!(dashboard.row1[0].title, "Department");
        assert_eq!(dashboard.row1[0].icon, "img/master_department.png");
        assert_eq!(dashboard.row2[3].url, "/masters/product-development/");
    }

    #[test]
    fn test_operation_dashboard_split() {
        let dashboard = operation_dashboard();
        assert_eq!(
            dashboard.row1.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            vec![
                "CREATE ORDER",
                "ADMIN-ACCOUNTS CLEARANCE",
                "PM-ORDER ACCEPTANCE",
                "PM-PREPARE BATCH CHART",
                "DISPATCH PLANNING",
                "PM-MATERIAL INWORD",
            ]
        );
        assert_eq!(
            dashboard.row2.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            vec![
                "PM-SPLIT ORDER",
                "ADMIN-MATERIAL DISCARD",
                "PM-RETURN INWORD",
                "UPDATE PRODUCT",
            ]
        );
    }
}
