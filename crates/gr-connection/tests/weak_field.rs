//! Weak-field connection in [t, x, y, z].

use gr_connection::{Connection, EnumerationConfig};
use gr_metric::{PhysicalConstants, newton_metric, weak_field_limit_metric};
use gr_symbolic::{Expr, equivalent};

fn connection() -> Connection {
    Connection::from_spacetime(&weak_field_limit_metric(&PhysicalConstants::new())).unwrap()
}

#[test]
fn counts_of_nonzero_symbols() {
    let conn = connection();
    assert_eq!(
        conn.christoffel_symbols(&EnumerationConfig::default()).unwrap().len(),
        30
    );
    let unique = EnumerationConfig {
        lower_symmetric_only: true,
        ..Default::default()
    };
    assert_eq!(conn.christoffel_symbols(&unique).unwrap().len(), 21);
}

#[test]
fn time_components_match_newtonian_limit() {
    let k = PhysicalConstants::new();
    let weak = connection();
    let newton = Connection::from_spacetime(&newton_metric(&k)).unwrap();
    for j in 1..4 {
        assert_eq!(
            weak.coefficient(0, 0, j).unwrap(),
            newton.coefficient(0, 0, j).unwrap()
        );
    }
}

#[test]
fn spatial_curvature_terms() {
    let conn = connection();
    let g111 = conn.coefficient(1, 1, 1).unwrap();
    let g122 = conn.coefficient(1, 2, 2).unwrap();
    let g112 = conn.coefficient(1, 1, 2).unwrap();
    let g212 = conn.coefficient(2, 1, 2).unwrap();
    assert!(!g111.is_zero());
    assert!(equivalent(&g122, &-g111.clone()).unwrap());
    assert!(equivalent(&g212, &g111).unwrap());
    assert!(!g112.is_zero());
    assert_eq!(conn.coefficient(1, 2, 3).unwrap(), Expr::zero());
}
