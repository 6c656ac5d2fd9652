//! Graphviz DOT export.
//!
//! [`DotExporter`] converts a [`Layout`] into a `digraph ERD` built from
//! `dot-structures` statements and printed with `graphviz-rust`. Every node
//! carries a `pos` attribute with its computed coordinates; with pinning on
//! (the default) the position is suffixed with `!` so `neato` keeps it.
//!
//! Node identifiers are allocated through a registry that appends `_{k}` on
//! collision, so entities with the same name and repeated attribute names
//! never share a node.

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Vertex,
};
use graphviz_rust::printer::PrinterContext;
use indexmap::IndexSet;
use log::{debug, trace};

use erdify_core::{color::Color, geometry::Point};

use crate::layout::{AttributeSize, Layout, PlacedAttribute};

const ENTITY_WIDTH: f64 = 1.8;
const ENTITY_HEIGHT: f64 = 0.7;
const ENTITY_FONT_SIZE: f64 = 11.0;
const RELATIONSHIP_WIDTH: f64 = 1.4;
const RELATIONSHIP_HEIGHT: f64 = 0.8;
const RELATIONSHIP_FONT_SIZE: f64 = 10.0;
const CARDINALITY_FONT_SIZE: f64 = 10.0;
const CARDINALITY_PEN_WIDTH: f64 = 1.5;
const ATTRIBUTE_PEN_WIDTH: f64 = 0.5;

/// Colors and fonts used in the DOT output.
#[derive(Debug, Clone, PartialEq)]
pub struct DotStyle {
    background: Color,
    fill: Color,
    font: Color,
    cardinality_label: Color,
    relationship_attribute_edge: Color,
    font_name: String,
    bold_font_name: String,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            background: Color::default(),
            fill: Color::default(),
            font: Color::new("black").expect("'black' is a valid CSS color"),
            cardinality_label: Color::new("#2C3E50").expect("valid hex color"),
            relationship_attribute_edge: Color::new("#64748b").expect("valid hex color"),
            font_name: "Arial".to_string(),
            bold_font_name: "Arial Bold".to_string(),
        }
    }
}

impl DotStyle {
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font = color;
        self
    }

    pub fn with_cardinality_label(mut self, color: Color) -> Self {
        self.cardinality_label = color;
        self
    }

    pub fn with_relationship_attribute_edge(mut self, color: Color) -> Self {
        self.relationship_attribute_edge = color;
        self
    }

    /// Sets the regular and bold font names.
    pub fn with_fonts(mut self, regular: impl Into<String>, bold: impl Into<String>) -> Self {
        self.font_name = regular.into();
        self.bold_font_name = bold.into();
        self
    }
}

/// Builds and prints DOT for a [`Layout`].
///
/// # Examples
///
/// ```
/// use erdify::{export::DotExporter, layout::Engine, session::{EntityField, Session}};
///
/// let mut session = Session::new();
/// let id = session.add_entity();
/// session.update_entity(id, EntityField::Name("Student".to_string()));
///
/// let layout = Engine::new().calculate_layout(&session);
/// let dot = DotExporter::new().export(&layout);
/// assert!(dot.starts_with("digraph ERD"));
/// assert!(dot.contains("\"0,0!\""));
/// ```
#[derive(Debug, Clone)]
pub struct DotExporter {
    style: DotStyle,
    pin_positions: bool,
}

impl Default for DotExporter {
    fn default() -> Self {
        Self {
            style: DotStyle::default(),
            pin_positions: true,
        }
    }
}

impl DotExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: DotStyle) -> Self {
        self.style = style;
        self
    }

    /// Turns the `!` suffix on node positions on or off.
    pub fn with_pin_positions(mut self, pin_positions: bool) -> Self {
        self.pin_positions = pin_positions;
        self
    }

    /// Prints the DOT text for `layout`.
    pub fn export(&self, layout: &Layout) -> String {
        let graph = self.build_graph(layout);
        let dot = graphviz_rust::print(graph, &mut PrinterContext::default());
        debug!(bytes = dot.len(); "DOT exported");
        dot
    }

    /// Builds the `digraph ERD` statement tree for `layout`.
    pub fn build_graph(&self, layout: &Layout) -> Graph {
        let mut ids = NodeIds::default();
        let entity_ids: Vec<String> = layout
            .entities()
            .iter()
            .map(|entity| ids.allocate(entity.label()))
            .collect();
        let relationship_ids: Vec<String> = layout
            .relationships()
            .iter()
            .map(|rel| ids.allocate(&format!("rel_{}", rel.ordinal())))
            .collect();

        let mut stmts = self.graph_attributes(layout.entities().len());

        for (entity, entity_id) in layout.entities().iter().zip(&entity_ids) {
            stmts.push(Stmt::Node(Node::new(
                node_id(entity_id),
                vec![
                    attr("shape", plain("box")),
                    attr("style", plain("filled")),
                    attr("fillcolor", quoted(&self.style.fill.to_dot_string())),
                    attr("fontcolor", quoted(&self.style.font.to_dot_string())),
                    attr("fontname", quoted(&self.style.bold_font_name)),
                    attr("fontsize", number(ENTITY_FONT_SIZE)),
                    attr("width", number(ENTITY_WIDTH)),
                    attr("height", number(ENTITY_HEIGHT)),
                    attr("label", quoted(entity.label())),
                    attr("pos", self.pos(entity.position())),
                ],
            )));

            for attribute in entity.attributes() {
                let attribute_id = ids.allocate(&attribute_node_name(entity_id, attribute.name()));
                stmts.push(self.attribute_node(
                    &attribute_id,
                    attribute,
                    entity.attribute_size(),
                ));
                stmts.push(edge(
                    &attribute_id,
                    entity_id,
                    vec![
                        attr("arrowhead", plain("none")),
                        attr("penwidth", number(ATTRIBUTE_PEN_WIDTH)),
                    ],
                ));
            }
        }

        for (rel, rel_id) in layout.relationships().iter().zip(&relationship_ids) {
            trace!(relationship = rel_id.as_str(), label = rel.label(); "Exporting relationship");
            stmts.push(Stmt::Node(Node::new(
                node_id(rel_id),
                vec![
                    attr("shape", plain("diamond")),
                    attr("style", plain("filled")),
                    attr("fillcolor", quoted(&self.style.fill.to_dot_string())),
                    attr("fontcolor", quoted(&self.style.font.to_dot_string())),
                    attr("fontname", quoted(&self.style.bold_font_name)),
                    attr("fontsize", number(RELATIONSHIP_FONT_SIZE)),
                    attr("label", quoted(rel.label())),
                    attr("width", number(RELATIONSHIP_WIDTH)),
                    attr("height", number(RELATIONSHIP_HEIGHT)),
                    attr("pos", self.pos(rel.position())),
                ],
            )));

            for attribute in rel.attributes() {
                let attribute_id = ids.allocate(&attribute_node_name(rel_id, attribute.name()));
                stmts.push(self.attribute_node(&attribute_id, attribute, AttributeSize::RELATIONSHIP));
                stmts.push(edge(
                    &attribute_id,
                    rel_id,
                    vec![
                        attr("arrowhead", plain("none")),
                        attr("penwidth", number(ATTRIBUTE_PEN_WIDTH)),
                        attr("style", plain("dashed")),
                        attr(
                            "color",
                            quoted(&self.style.relationship_attribute_edge.to_dot_string()),
                        ),
                    ],
                ));
            }

            let (label1, label2) = rel.cardinality().labels();
            stmts.push(edge(
                &entity_ids[rel.entity1()],
                rel_id,
                self.cardinality_attributes(label1),
            ));
            stmts.push(edge(
                rel_id,
                &entity_ids[rel.entity2()],
                self.cardinality_attributes(label2),
            ));
        }

        debug!(statements = stmts.len(), nodes = ids.len(); "DOT graph built");

        Graph::DiGraph {
            id: plain("ERD"),
            strict: false,
            stmts,
        }
    }

    fn graph_attributes(&self, entity_count: usize) -> Vec<Stmt> {
        let (overlap, sep) = match entity_count {
            n if n <= 10 => ("scalexy", "+0.2"),
            n if n <= 15 => ("scalexy", "+2.0"),
            _ => ("vpsc", "+2.5"),
        };

        vec![
            Stmt::Attribute(attr(
                "bgcolor",
                quoted(&self.style.background.to_dot_string()),
            )),
            Stmt::Attribute(attr("layout", quoted("neato"))),
            Stmt::Attribute(attr("overlap", quoted(overlap))),
            Stmt::Attribute(attr("sep", quoted(sep))),
            Stmt::Attribute(attr("splines", quoted("line"))),
            Stmt::GAttribute(GraphAttributes::Node(vec![attr(
                "fontname",
                quoted(&self.style.font_name),
            )])),
            Stmt::GAttribute(GraphAttributes::Edge(vec![attr(
                "fontname",
                quoted(&self.style.font_name),
            )])),
        ]
    }

    fn attribute_node(&self, id: &str, attribute: &PlacedAttribute, size: AttributeSize) -> Stmt {
        let (label, font_name) = if attribute.is_primary_key() {
            (
                Id::Html(format!("<<U>{}</U>>", escape_html(attribute.name()))),
                &self.style.bold_font_name,
            )
        } else {
            (quoted(attribute.name()), &self.style.font_name)
        };

        Stmt::Node(Node::new(
            node_id(id),
            vec![
                attr("shape", plain("ellipse")),
                attr("style", plain("filled")),
                attr("fillcolor", quoted(&self.style.fill.to_dot_string())),
                attr("fontcolor", quoted(&self.style.font.to_dot_string())),
                attr("fontname", quoted(font_name)),
                attr("fontsize", number(size.font_size())),
                attr("width", number(size.width())),
                attr("height", number(size.height())),
                attr("label", label),
                attr("pos", self.pos(attribute.position())),
            ],
        ))
    }

    fn cardinality_attributes(&self, label: &str) -> Vec<Attribute> {
        vec![
            attr("label", quoted(label)),
            attr("arrowhead", plain("none")),
            attr("fontsize", number(CARDINALITY_FONT_SIZE)),
            attr("fontname", quoted(&self.style.bold_font_name)),
            attr(
                "fontcolor",
                quoted(&self.style.cardinality_label.to_dot_string()),
            ),
            attr("penwidth", number(CARDINALITY_PEN_WIDTH)),
        ]
    }

    fn pos(&self, point: Point) -> Id {
        let suffix = if self.pin_positions { "!" } else { "" };
        quoted(&format!(
            "{},{}{suffix}",
            format_number(point.x()),
            format_number(point.y())
        ))
    }
}

/// Hands out node identifiers, suffixing `_{k}` when one is already taken.
///
/// Identifiers are kept in allocation order.
#[derive(Debug, Default)]
struct NodeIds {
    used: IndexSet<String>,
}

impl NodeIds {
    fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        (2..)
            .map(|k| format!("{base}_{k}"))
            .find(|candidate| self.used.insert(candidate.clone()))
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.used.len()
    }
}

/// `{owner}_{attribute}` with every whitespace run replaced by `_`.
fn attribute_node_name(owner: &str, attribute: &str) -> String {
    format!("{owner}_{attribute}")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn format_number(value: f64) -> String {
    // avoids printing "-0"
    format!("{}", value + 0.0)
}

fn attr(key: &str, value: Id) -> Attribute {
    Attribute(plain(key), value)
}

fn plain(value: &str) -> Id {
    Id::Plain(value.to_string())
}

fn number(value: f64) -> Id {
    Id::Plain(format_number(value))
}

fn quoted(value: &str) -> Id {
    Id::Escaped(format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")))
}

fn node_id(id: &str) -> NodeId {
    NodeId(quoted(id), None)
}

fn edge(from: &str, to: &str, attributes: Vec<Attribute>) -> Stmt {
    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(Vertex::N(node_id(from)), Vertex::N(node_id(to))),
        attributes,
    })
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::Engine,
        session::{EntityField, RelationshipField, Session},
    };
    use erdify_core::semantic::Cardinality;

    fn id_text(id: &Id) -> String {
        match id {
            Id::Html(s) | Id::Plain(s) | Id::Anonymous(s) => s.clone(),
            Id::Escaped(s) => s.trim_matches('"').to_string(),
        }
    }

    fn nodes(graph: &Graph) -> Vec<&Node> {
        let Graph::DiGraph { stmts, .. } = graph else {
            panic!("expected a digraph");
        };
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Node(node) => Some(node),
                _ => None,
            })
            .collect()
    }

    fn edges(graph: &Graph) -> Vec<(String, String, Vec<(String, String)>)> {
        let Graph::DiGraph { stmts, .. } = graph else {
            panic!("expected a digraph");
        };
        stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Edge(Edge {
                    ty: EdgeTy::Pair(Vertex::N(from), Vertex::N(to)),
                    attributes,
                }) => Some((
                    id_text(&from.0),
                    id_text(&to.0),
                    attributes
                        .iter()
                        .map(|Attribute(k, v)| (id_text(k), id_text(v)))
                        .collect(),
                )),
                _ => None,
            })
            .collect()
    }

    fn node_attr(node: &Node, key: &str) -> Option<String> {
        node.attributes
            .iter()
            .find(|Attribute(k, _)| id_text(k) == key)
            .map(|Attribute(_, v)| id_text(v))
    }

    fn find_node<'a>(graph: &'a Graph, id: &str) -> &'a Node {
        nodes(graph)
            .into_iter()
            .find(|node| id_text(&node.id.0) == id)
            .unwrap_or_else(|| panic!("node {id} not found"))
    }

    fn session(names: &[&str]) -> Session {
        let mut session = Session::new();
        for name in names {
            let id = session.add_entity();
            session.update_entity(id, EntityField::Name(name.to_string()));
        }
        session
    }

    fn graph_for(session: &Session) -> Graph {
        DotExporter::new().build_graph(&Engine::new().calculate_layout(session))
    }

    #[test]
    fn test_entity_node_is_pinned() {
        let graph = graph_for(&session(&["Student"]));
        let node = find_node(&graph, "Student");
        assert_eq!(node_attr(node, "shape").as_deref(), Some("box"));
        assert_eq!(node_attr(node, "pos").as_deref(), Some("0,0!"));
        assert_eq!(node_attr(node, "fontname").as_deref(), Some("Arial Bold"));
        assert_eq!(node_attr(node, "fillcolor").as_deref(), Some("#ffffff"));
    }

    #[test]
    fn test_pinning_can_be_disabled() {
        let layout = Engine::new().calculate_layout(&session(&["Student"]));
        let graph = DotExporter::new().with_pin_positions(false).build_graph(&layout);
        let node = find_node(&graph, "Student");
        assert_eq!(node_attr(node, "pos").as_deref(), Some("0,0"));
    }

    #[test]
    fn test_primary_key_is_underlined() {
        let mut session = session(&["Student"]);
        let id = session.entities()[0].id();
        session.add_attribute(id, "student_id");
        session.add_attribute(id, "name");
        session.update_entity(id, EntityField::PrimaryKey("student_id".to_string()));

        let graph = graph_for(&session);
        let pk = find_node(&graph, "Student_student_id");
        assert_eq!(node_attr(pk, "label").as_deref(), Some("<<U>student_id</U>>"));
        assert_eq!(node_attr(pk, "fontname").as_deref(), Some("Arial Bold"));

        let plain_attr = find_node(&graph, "Student_name");
        assert_eq!(node_attr(plain_attr, "label").as_deref(), Some("name"));
        assert_eq!(node_attr(plain_attr, "fontname").as_deref(), Some("Arial"));

        let attribute_edges: Vec<_> = edges(&graph)
            .into_iter()
            .filter(|(_, to, _)| to == "Student")
            .collect();
        assert_eq!(attribute_edges.len(), 2);
        assert!(
            attribute_edges[0]
                .2
                .contains(&("penwidth".to_string(), "0.5".to_string()))
        );
    }

    #[test]
    fn test_duplicate_names_do_not_alias() {
        let mut session = session(&["Twin", "Twin"]);
        let first = session.entities()[0].id();
        session.add_attribute(first, "code");
        session.add_attribute(first, "code");

        let graph = graph_for(&session);
        let ids: Vec<String> = nodes(&graph)
            .iter()
            .map(|node| id_text(&node.id.0))
            .collect();
        assert_eq!(ids, ["Twin", "Twin_code", "Twin_code_2", "Twin_2"]);
        assert_eq!(node_attr(find_node(&graph, "Twin_2"), "label").as_deref(), Some("Twin"));
    }

    #[test]
    fn test_whitespace_in_attribute_ids() {
        let mut session = session(&["Order Item"]);
        let id = session.entities()[0].id();
        session.add_attribute(id, "unit  price");

        let graph = graph_for(&session);
        find_node(&graph, "Order_Item_unit_price");
    }

    #[test]
    fn test_cardinality_edges() {
        let mut session = session(&["Student", "Course"]);
        let rel = session.add_relationship().unwrap();
        session.update_relationship(rel, RelationshipField::Entity1("Student".to_string()));
        session.update_relationship(rel, RelationshipField::Entity2("Course".to_string()));
        session.update_relationship(rel, RelationshipField::Cardinality(Cardinality::ManyToOne));

        let graph = graph_for(&session);
        let diamond = find_node(&graph, "rel_1");
        assert_eq!(node_attr(diamond, "shape").as_deref(), Some("diamond"));
        assert_eq!(node_attr(diamond, "label").as_deref(), Some("Relasi_1"));
        assert_eq!(node_attr(diamond, "pos").as_deref(), Some("2,0!"));

        let all = edges(&graph);
        let (_, _, first) = all
            .iter()
            .find(|(from, to, _)| from == "Student" && to == "rel_1")
            .unwrap();
        assert!(first.contains(&("label".to_string(), "N".to_string())));
        assert!(first.contains(&("fontcolor".to_string(), "#2c3e50".to_string())));
        let (_, _, second) = all
            .iter()
            .find(|(from, to, _)| from == "rel_1" && to == "Course")
            .unwrap();
        assert!(second.contains(&("label".to_string(), "1".to_string())));
    }

    #[test]
    fn test_relationship_attribute_edges_are_dashed() {
        let mut session = session(&["Student", "Course"]);
        let rel = session.add_relationship().unwrap();
        session.update_relationship(rel, RelationshipField::Entity1("Student".to_string()));
        session.update_relationship(rel, RelationshipField::Entity2("Course".to_string()));
        session.update_relationship(rel, RelationshipField::Cardinality(Cardinality::ManyToMany));
        session.add_relationship_attribute(rel, "grade");

        let graph = graph_for(&session);
        let node = find_node(&graph, "rel_1_grade");
        assert_eq!(node_attr(node, "width").as_deref(), Some("1"));
        assert_eq!(node_attr(node, "height").as_deref(), Some("0.45"));

        let (_, _, attrs) = edges(&graph)
            .into_iter()
            .find(|(from, _, _)| from == "rel_1_grade")
            .unwrap();
        assert!(attrs.contains(&("style".to_string(), "dashed".to_string())));
        assert!(attrs.contains(&("color".to_string(), "#64748b".to_string())));
    }

    #[test]
    fn test_overlap_scales_with_entity_count() {
        let names: Vec<String> = (0..16).map(|i| format!("E{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let graph = graph_for(&session(&refs));
        let Graph::DiGraph { stmts, .. } = &graph else {
            unreachable!();
        };
        assert!(stmts.iter().any(|stmt| matches!(
            stmt,
            Stmt::Attribute(Attribute(k, v)) if id_text(k) == "overlap" && id_text(v) == "vpsc"
        )));
    }

    #[test]
    fn test_output_parses() {
        let mut session = session(&["Student", "Course \"Main\""]);
        let id = session.entities()[0].id();
        session.add_attribute(id, "a<b");
        session.update_entity(id, EntityField::PrimaryKey("a<b".to_string()));

        let dot = DotExporter::new().export(&Engine::new().calculate_layout(&session));
        assert!(graphviz_rust::parse(&dot).is_ok(), "unparseable DOT:\n{dot}");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.8), "1.8");
        assert_eq!(format_number(11.0), "11");
    }
}
