// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Entity descriptors
//!
//! Every entity type declares an ordered table of [`Directive`]s. A column
//! directive maps one row label onto one scalar field; an invocation
//! directive fills a child collection by calling a provider operation with
//! arguments templated from fields bound earlier.
//!
//! The declared table is validated once by the [`DescriptorRegistry`] and
//! turned into a [`Descriptor`], which is what the binder works from.

pub mod registry;

pub use registry::DescriptorRegistry;

use crate::bind::Populate;
use crate::error::{CoercionError, MetadataError, MetadataResult};
use crate::provider::{Argument, Operation};
use crate::value::{ColumnValue, Value};
use std::collections::HashSet;
use std::fmt;

/// A record shape the binder can populate from provider rows.
pub trait Entity: Default + Send + Sync + 'static {
    /// Type name used as the first segment of every path of this entity.
    const NAME: &'static str;

    fn directives() -> Vec<Directive<Self>>;
}

/// `"<entity>/<field>"`
pub fn path_of(entity: &str, field: &str) -> String {
    format!("{}/{}", entity, field)
}

pub enum Directive<T> {
    Column(ColumnBinding<T>),
    Invoke(Invocation<T>),
}

impl<T> Directive<T> {
    pub fn field(&self) -> &'static str {
        match self {
            Directive::Column(c) => c.field,
            Directive::Invoke(i) => i.field,
        }
    }
}

type Reader<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
type Writer<T> = Box<dyn Fn(&mut T, &Value) -> Result<(), CoercionError> + Send + Sync>;

/// Typed access to one scalar field of an entity
pub struct FieldSlot<T> {
    type_name: &'static str,
    nullable: bool,
    read: Reader<T>,
    write: Writer<T>,
}

impl<T: 'static> FieldSlot<T> {
    pub fn new<V: ColumnValue>(get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self {
        Self {
            type_name: V::TYPE_NAME,
            nullable: V::NULLABLE,
            read: Box::new(move |owner| get(owner).to_value()),
            write: Box::new(move |owner, value| {
                *get_mut(owner) = V::from_value(value)?;
                Ok(())
            }),
        }
    }
}

impl<T> FieldSlot<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the field can hold an absent value.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn read(&self, owner: &T) -> Value {
        (self.read)(owner)
    }

    /// Coerce `value` into the field. On error the field is left untouched.
    pub fn write(&self, owner: &mut T, value: &Value) -> Result<(), CoercionError> {
        (self.write)(owner, value)
    }
}

/// Maps one row label onto one field
pub struct ColumnBinding<T> {
    pub field: &'static str,
    pub label: &'static str,
    pub nillable: bool,
    /// The label must be present but its value is discarded.
    pub unused: bool,
    pub slot: Option<FieldSlot<T>>,
}

impl<T> ColumnBinding<T> {
    pub fn new(field: &'static str, label: &'static str, slot: FieldSlot<T>) -> Self {
        Self {
            field,
            label,
            nillable: false,
            unused: false,
            slot: Some(slot),
        }
    }

    pub fn unused(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            nillable: true,
            unused: true,
            slot: None,
        }
    }

    pub fn nillable(mut self) -> Self {
        self.nillable = true;
        self
    }
}

/// Fills one child collection from a provider operation
///
/// Each entry of `argument_sets` is one call. Tokens are either literals
/// (`null`, `true`, `0`, `TABLE,VIEW`) or back-references to a sibling
/// field (`:tableCat`). Results of every call are appended in order.
pub struct Invocation<T> {
    pub field: &'static str,
    pub operation: Operation,
    pub argument_sets: Vec<Vec<&'static str>>,
    pub children: Box<dyn Populate<T>>,
}

/// One resolved argument position of an invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentTemplate {
    Literal(Argument),
    /// Index into [`Descriptor::columns`] of the referenced field.
    Reference { field: &'static str, column: usize },
}

impl fmt::Display for ArgumentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentTemplate::Literal(arg) => write!(f, "{}", arg),
            ArgumentTemplate::Reference { field, .. } => write!(f, ":{}", field),
        }
    }
}

/// A validated invocation directive
pub struct InvocationPlan<T> {
    pub field: &'static str,
    pub operation: Operation,
    pub argument_sets: Vec<Vec<ArgumentTemplate>>,
    pub children: Box<dyn Populate<T>>,
}

/// Validated directive table of one entity type
pub struct Descriptor<T> {
    pub entity: &'static str,
    pub columns: Vec<ColumnBinding<T>>,
    pub invocations: Vec<InvocationPlan<T>>,
}

impl<T: Entity> Descriptor<T> {
    /// Validate the directives declared by `T`.
    pub fn build() -> MetadataResult<Self> {
        let invalid = |reason: String| MetadataError::InvalidDescriptor {
            entity: T::NAME,
            reason,
        };

        let mut seen = HashSet::new();
        let mut columns: Vec<ColumnBinding<T>> = Vec::new();
        let mut invocations = Vec::new();

        for directive in T::directives() {
            let field = directive.field();
            if field.is_empty() {
                return Err(invalid("empty field name".to_string()));
            }
            if !seen.insert(field) {
                return Err(invalid(format!("duplicate field '{}'", field)));
            }

            match directive {
                Directive::Column(column) => {
                    if column.label.is_empty() {
                        return Err(invalid(format!("field '{}' has an empty label", field)));
                    }
                    match &column.slot {
                        Some(slot) if slot.is_nullable() != column.nillable => {
                            return Err(invalid(format!(
                                "field '{}' is {} but its type {} {} absent values",
                                field,
                                if column.nillable { "nillable" } else { "not nillable" },
                                slot.type_name(),
                                if slot.is_nullable() { "allows" } else { "cannot hold" },
                            )));
                        }
                        None if !column.unused => {
                            return Err(invalid(format!("field '{}' has no slot", field)));
                        }
                        _ => {}
                    }
                    columns.push(column);
                }
                Directive::Invoke(invocation) => {
                    let plan = plan_invocation(invocation, &columns).map_err(invalid)?;
                    invocations.push(plan);
                }
            }
        }

        Ok(Self {
            entity: T::NAME,
            columns,
            invocations,
        })
    }
}

impl<T> Descriptor<T> {
    pub fn column(&self, field: &str) -> Option<&ColumnBinding<T>> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Every label the column directives reference.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.label)
    }
}

fn plan_invocation<T>(
    invocation: Invocation<T>,
    columns: &[ColumnBinding<T>],
) -> Result<InvocationPlan<T>, String> {
    let field = invocation.field;
    let parameters = invocation.operation.parameters();
    if invocation.argument_sets.is_empty() {
        return Err(format!("invocation '{}' has no argument set", field));
    }

    let mut argument_sets = Vec::with_capacity(invocation.argument_sets.len());
    for tokens in &invocation.argument_sets {
        if tokens.len() != parameters.len() {
            return Err(format!(
                "invocation '{}' passes {} arguments to {}, which takes {}",
                field,
                tokens.len(),
                invocation.operation,
                parameters.len()
            ));
        }

        let mut templates = Vec::with_capacity(tokens.len());
        for (token, kind) in tokens.iter().zip(parameters) {
            let template = match token.strip_prefix(':') {
                Some(name) => {
                    let column = columns
                        .iter()
                        .position(|c| c.field == name)
                        .ok_or_else(|| {
                            format!(
                                "invocation '{}' references '{}': no earlier column",
                                field, name
                            )
                        })?;
                    if columns[column].unused {
                        return Err(format!(
                            "invocation '{}' references unused column '{}'",
                            field, name
                        ));
                    }
                    ArgumentTemplate::Reference {
                        field: columns[column].field,
                        column,
                    }
                }
                None => ArgumentTemplate::Literal(
                    Argument::parse_literal(token, *kind)
                        .map_err(|e| format!("invocation '{}': {}", field, e))?,
                ),
            };
            templates.push(template);
        }
        argument_sets.push(templates);
    }

    Ok(InvocationPlan {
        field,
        operation: invocation.operation,
        argument_sets,
        children: invocation.children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::Children;

    #[derive(Debug, Default)]
    struct Fields {
        name: String,
        note: Option<String>,
        kids: Vec<Kid>,
    }

    #[derive(Debug, Default)]
    struct Kid {
        name: String,
    }

    impl Entity for Kid {
        const NAME: &'static str = "kid";

        fn directives() -> Vec<Directive<Self>> {
            vec![Directive::Column(ColumnBinding::new(
                "name",
                "KID_NAME",
                FieldSlot::new(|k: &Kid| &k.name, |k: &mut Kid| &mut k.name),
            ))]
        }
    }

    trait Probe: Entity {
        fn fields(&self) -> &Fields;
        fn fields_mut(&mut self) -> &mut Fields;
    }

    macro_rules! probe {
        ($ty:ident => $($directive:expr),* $(,)?) => {
            #[derive(Debug, Default)]
            struct $ty(Fields);

            impl Probe for $ty {
                fn fields(&self) -> &Fields {
                    &self.0
                }
                fn fields_mut(&mut self) -> &mut Fields {
                    &mut self.0
                }
            }

            impl Entity for $ty {
                const NAME: &'static str = "probe";

                fn directives() -> Vec<Directive<Self>> {
                    vec![$($directive),*]
                }
            }
        };
    }

    fn name_column<T: Probe>() -> Directive<T> {
        Directive::Column(ColumnBinding::new(
            "name",
            "NAME",
            FieldSlot::new(|p: &T| &p.fields().name, |p: &mut T| &mut p.fields_mut().name),
        ))
    }

    fn note_column<T: Probe>() -> ColumnBinding<T> {
        ColumnBinding::new(
            "note",
            "NOTE",
            FieldSlot::new(|p: &T| &p.fields().note, |p: &mut T| &mut p.fields_mut().note),
        )
    }

    fn kids<T: Probe>(tokens: Vec<&'static str>) -> Directive<T> {
        Directive::Invoke(Invocation {
            field: "kids",
            operation: Operation::GetPrimaryKeys,
            argument_sets: vec![tokens],
            children: Box::new(Children::new(|p: &mut T| &mut p.fields_mut().kids)),
        })
    }

    #[test]
    fn test_valid_descriptor_resolves_references() {
        probe!(Valid => name_column(), kids(vec!["null", ":name", "null"]));

        let descriptor = Descriptor::<Valid>::build().unwrap();
        assert_eq!(descriptor.columns.len(), 1);
        assert_eq!(
            descriptor.invocations[0].argument_sets[0],
            vec![
                ArgumentTemplate::Literal(Argument::Null),
                ArgumentTemplate::Reference {
                    field: "name",
                    column: 0
                },
                ArgumentTemplate::Literal(Argument::Null),
            ]
        );
    }

    #[test]
    fn test_duplicate_field_rejected() {
        probe!(Duplicate => name_column(), name_column());

        let err = Descriptor::<Duplicate>::build().err().unwrap();
        assert!(err.to_string().contains("duplicate field 'name'"));
    }

    #[test]
    fn test_forward_reference_rejected() {
        probe!(Forward => kids(vec!["null", ":name", "null"]), name_column());

        let err = Descriptor::<Forward>::build().err().unwrap();
        assert!(err.is_structural());
        assert!(err.to_string().contains("references 'name'"));
    }

    #[test]
    fn test_arity_mismatch_rejected() {
        probe!(Arity => name_column(), kids(vec![":name"]));

        let err = Descriptor::<Arity>::build().err().unwrap();
        assert!(err.to_string().contains("takes 3"));
    }

    #[test]
    fn test_nillable_must_match_slot() {
        probe!(Strict => Directive::Column(note_column()));
        probe!(Lenient => Directive::Column(note_column().nillable()));

        let err = Descriptor::<Strict>::build().err().unwrap();
        assert!(err.to_string().contains("not nillable"));
        assert!(Descriptor::<Lenient>::build().is_ok());
    }

    #[test]
    fn test_field_slot_coerces_and_reads_back() {
        let slot = FieldSlot::new(|k: &Kid| &k.name, |k: &mut Kid| &mut k.name);
        let mut kid = Kid::default();
        slot.write(&mut kid, &Value::from("a")).unwrap();
        assert_eq!(slot.read(&kid), Value::from("a"));
        assert!(slot.write(&mut kid, &Value::Null).is_err());
        assert_eq!(kid.name, "a");
    }
}
