//! Example: Building a diagram from an editing session
//!
//! This example builds a small library schema through the session API,
//! without loading a JSON document, then exports DOT and the saved document.

use erdify::{
    DiagramBuilder,
    semantic::{Cardinality, LayoutHint},
    session::{EntityField, RelationshipField, Session},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building diagram from a session...\n");

    let mut session = Session::new();
    session.set_name("Library Loans");

    // Entities with their attributes; the first attribute becomes the key
    let tables = [
        ("Member", ["member_id", "name", "email"]),
        ("Loan", ["loan_id", "due_date", "returned"]),
        ("Book", ["isbn", "title", "author"]),
    ];
    for (name, attributes) in tables {
        let id = session.add_entity();
        session.update_entity(id, EntityField::Name(name.to_string()));
        for attribute in attributes {
            session.add_attribute(id, attribute);
        }
        session.update_entity(id, EntityField::PrimaryKey(attributes[0].to_string()));
    }

    // Member -> Loan on the same row, Book placed below Loan
    let borrows = session.add_relationship()?;
    session.update_relationship(borrows, RelationshipField::Entity1("Member".to_string()));
    session.update_relationship(borrows, RelationshipField::Entity2("Loan".to_string()));
    session.update_relationship(borrows, RelationshipField::Relation("borrows".to_string()));
    session.update_relationship(borrows, RelationshipField::Cardinality(Cardinality::OneToMany));
    session.update_relationship(borrows, RelationshipField::Layout(LayoutHint::LeftToRight));

    let covers = session.add_relationship()?;
    session.update_relationship(covers, RelationshipField::Entity1("Loan".to_string()));
    session.update_relationship(covers, RelationshipField::Entity2("Book".to_string()));
    session.update_relationship(covers, RelationshipField::Relation("covers".to_string()));
    session.update_relationship(covers, RelationshipField::Cardinality(Cardinality::ManyToMany));
    session.update_relationship(covers, RelationshipField::Layout(LayoutHint::TopToBottom));
    session.add_relationship_attribute(covers, "copy_number");

    let builder = DiagramBuilder::default();

    // Print layout info
    let layout = builder.layout(&session);
    println!("Laid out diagram:");
    for entity in layout.entities() {
        let position = entity.position();
        println!("  {} at ({}, {})", entity.label(), position.x(), position.y());
    }
    println!("  Relationships: {}", layout.relationships().len());
    println!();

    let dot = builder.render_dot(&session)?;
    println!("DOT generated: {} bytes", dot.len());

    let output_path = "build_session_output.dot";
    std::fs::write(output_path, &dot)?;
    println!("DOT written to: {}", output_path);

    let json = builder.save(&session)?;
    println!("\nSaved document:\n{json}");

    Ok(())
}
