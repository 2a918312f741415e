// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{memory_persistence, test_user};
use crate::handlers::{create_series, list_series, list_series_ordered};
use crate::request_response::CreateSeriesRequest;

#[test]
fn create_series_is_idempotent_by_pair() {
    let mut persistence = memory_persistence();
    let user = test_user();
    let request = CreateSeriesRequest {
        number: 2,
        letter: 'A',
    };

    let first = create_series(&mut persistence, &user, request.clone()).expect("first create");
    assert!(!first.already_existed);

    let second = create_series(&mut persistence, &user, request).expect("second create");
    assert!(second.already_existed);
    assert_eq!(first.series.series_id, second.series.series_id);

    assert_eq!(list_series(&persistence, &user).expect("list").len(), 1);
}

#[test]
fn distinct_pairs_create_distinct_series() {
    let mut persistence = memory_persistence();
    let user = test_user();

    for (number, letter) in [(2, 'A'), (2, 'B'), (3, 'A')] {
        let outcome = create_series(
            &mut persistence,
            &user,
            CreateSeriesRequest { number, letter },
        )
        .expect("create");
        assert!(!outcome.already_existed);
    }

    let ordered = list_series_ordered(&persistence, &user).expect("list");
    let labels: Vec<String> = ordered.iter().map(roster_domain::Series::label).collect();
    assert_eq!(labels, vec!["2A", "2B", "3A"]);
}
