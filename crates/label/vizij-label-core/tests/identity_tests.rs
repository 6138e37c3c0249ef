use serde_json::json;
use vizij_label_core::{
    compose_label_id, resolve_label_id, AnimateOption, Coordinate, Element, Geometry,
    GeometryKind, GeometryLabel, GeometrySpec, LabelAttributes, LabelId, LabelStrategy,
    MappingDatum, RequestLog,
};

fn datum(x: f32, y: f32, v: serde_json::Value) -> MappingDatum {
    MappingDatum::new(x, y, v.as_object().cloned().unwrap_or_default())
}

/// Series geometry whose element identity is the city name.
struct CitySeries {
    kind: GeometryKind,
    elements: Vec<Element>,
    animate: AnimateOption,
}

impl Geometry for CitySeries {
    fn kind(&self) -> GeometryKind {
        self.kind
    }
    fn elements(&self) -> &[Element] {
        &self.elements
    }
    fn element_id(&self, datum: &MappingDatum) -> String {
        datum.field_text("city")
    }
    fn x_field(&self) -> Option<&str> {
        Some("year")
    }
    fn y_field(&self) -> Option<&str> {
        Some("value")
    }
    fn animate_option(&self) -> &AnimateOption {
        &self.animate
    }
}

fn lon_series(kind: GeometryKind) -> CitySeries {
    CitySeries {
        kind,
        elements: vec![Element::series(vec![
            datum(0.0, 10.0, json!({"city": "Lon", "year": 1991, "value": 3})),
            datum(10.0, 20.0, json!({"city": "Lon", "year": 1992, "value": 4})),
            datum(20.0, 30.0, json!({"city": "Lon", "year": "1993", "value": 5})),
        ])],
        animate: AnimateOption::default(),
    }
}

fn per_datum() -> LabelStrategy {
    LabelStrategy::new().with_attributes(|e: &Element, _i: usize| {
        e.data
            .iter()
            .map(|d| LabelAttributes::new(d.x, d.y, d.field_text("value")))
            .collect()
    })
}

/// it should append the x value for line and area geometries so points sharing an element stay distinct
#[test]
fn line_and_area_labels_use_x_value() {
    for kind in [GeometryKind::Line, GeometryKind::Area] {
        let g = lon_series(kind);
        let ids: Vec<LabelId> = g.elements[0]
            .data
            .iter()
            .map(|d| resolve_label_id(&g, d))
            .collect();
        assert_eq!(
            ids,
            vec![
                LabelId::from("Lon 1991"),
                LabelId::from("Lon 1992"),
                LabelId::from("Lon 1993"),
            ],
            "{kind:?}"
        );
    }
}

/// it should append both x and y for path geometries
#[test]
fn path_labels_use_x_and_y() {
    let g = CitySeries {
        kind: GeometryKind::Path,
        elements: vec![Element::series(vec![
            datum(0.0, 0.0, json!({"city": "Lon", "year": 1991, "value": 3})),
            datum(0.0, 5.0, json!({"city": "Lon", "year": 1991, "value": 7})),
        ])],
        animate: AnimateOption::default(),
    };
    let a = resolve_label_id(&g, &g.elements[0].data[0]);
    let b = resolve_label_id(&g, &g.elements[0].data[1]);
    assert_eq!(a, LabelId::from("Lon 1991-3"));
    assert_eq!(b, LabelId::from("Lon 1991-7"));
}

/// it should leave the element identity untouched for other kinds
#[test]
fn other_kinds_use_base_identity() {
    let g = lon_series(GeometryKind::Point);
    let id = resolve_label_id(&g, &g.elements[0].data[1]);
    assert_eq!(id, LabelId::from("Lon"));
    assert_eq!(
        compose_label_id(GeometryKind::Polygon, "cell", "1", "2"),
        LabelId::from("cell")
    );
}

/// it should derive identical identity sets from identical input on every render
#[test]
fn rerender_yields_same_identity_set() {
    let mut label = GeometryLabel::new(lon_series(GeometryKind::Line), per_datum(), RequestLog::new());
    label.render(&Coordinate::Cartesian);
    let first = label.label_ids();
    label.render(&Coordinate::Cartesian);
    let second = label.label_ids();
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

/// it should keep one live shape per identity when two labels collide within a pass
#[test]
fn colliding_identities_share_one_shape() {
    // point kind ignores x, so all three labels resolve to "Lon"
    let mut label = GeometryLabel::new(lon_series(GeometryKind::Point), per_datum(), RequestLog::new());
    let report = label.render(&Coordinate::Cartesian);
    assert_eq!(report.draw.drawn, 1);
    assert_eq!(label.labels().count(), 1);
    // last drawn wins
    let shape = label.group().find(&LabelId::from("Lon")).expect("live shape");
    assert_eq!(shape.attrs().text, "5");
}

/// it should build reference element ids from x, y, group and dodge fields
#[test]
fn geometry_spec_element_ids() {
    let mut g = GeometrySpec::new(GeometryKind::Point)
        .with_fields("month", "rainfall")
        .with_group_field("name");
    g.dodge_by = Some("kind".into());
    let d = datum(0.0, 0.0, json!({"name": "Berlin", "month": "Mar.", "rainfall": 34.5, "kind": "a"}));
    assert_eq!(g.element_id(&d), "Mar.-34.5-Berlin-a");
    assert_eq!(resolve_label_id(&g, &d), LabelId::from("Mar.-34.5-Berlin-a"));

    let area = GeometrySpec::new(GeometryKind::Area)
        .with_fields("month", "rainfall")
        .with_group_field("name");
    assert_eq!(resolve_label_id(&area, &d), LabelId::from("area-Berlin Mar."));
}
