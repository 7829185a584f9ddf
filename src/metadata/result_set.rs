use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::{ColumnDescriptor, FieldOrder, MetadataError, MetadataResult, SelectItem};
use crate::schema::{
    resolve_nullability, resolve_primitive_type, ObjectSchema, SchemaError, SchemaNode,
};
use crate::types::{JdbcType, Nullability, TypeInfo, TypeTable, TYPE_TABLE};

/// The immutable column catalog of a result set.
///
/// Built once from a root schema; every accessor borrows. Positions are
/// 1-based.
#[derive(Debug, Clone)]
pub struct ResultSetMetadata {
    columns: Vec<ColumnDescriptor>,
    /// Label to every position carrying it, in ordinal order.
    labels: HashMap<String, Vec<usize>>,
    types: &'static TypeTable,
}

impl ResultSetMetadata {
    /// Flatten `schema` with datasources and columns in codepoint order.
    pub fn new(schema: &SchemaNode) -> MetadataResult<Self> {
        Self::with_field_order(schema, FieldOrder::Alphabetical)
    }

    /// Flatten `schema`, ordering columns within each datasource by `order`.
    ///
    /// Datasources are always walked in codepoint order.
    pub fn with_field_order(schema: &SchemaNode, order: FieldOrder) -> MetadataResult<Self> {
        let root = schema.expect_object("root")?;

        let mut datasources = root
            .properties()
            .map(|(name, node)| node.expect_object(name).map(|object| (name, object)))
            .collect::<Result<Vec<_>, SchemaError>>()?;
        datasources.sort_by(|a, b| a.0.cmp(b.0));

        let mut builder = Builder::new(&TYPE_TABLE);
        for (datasource, object) in datasources {
            let mut fields: Vec<(&str, &SchemaNode)> = object.properties().collect();
            if order == FieldOrder::Alphabetical {
                fields.sort_by(|a, b| a.0.cmp(b.0));
            }
            for (name, node) in fields {
                builder.push(datasource, object, name, node)?;
            }
        }

        Ok(builder.finish())
    }

    /// Build the catalog in an explicit select-list order.
    ///
    /// Every item must name a datasource of `schema` and a property of that
    /// datasource.
    pub fn with_select_order(schema: &SchemaNode, select: &[SelectItem]) -> MetadataResult<Self> {
        let root = schema.expect_object("root")?;

        let mut builder = Builder::new(&TYPE_TABLE);
        for item in select {
            let object = root
                .property(&item.datasource)
                .ok_or_else(|| SchemaError::ExpectedObject(item.datasource.clone()))?
                .expect_object(&item.datasource)?;
            let node = object
                .property(&item.field)
                .ok_or_else(|| SchemaError::InvalidColumn(item.field.clone()))?;
            builder.push(&item.datasource, object, &item.field, node)?;
        }

        Ok(builder.finish())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in ordinal order.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// The column at a 1-based position.
    pub fn column_at(&self, position: usize) -> MetadataResult<&ColumnDescriptor> {
        position
            .checked_sub(1)
            .and_then(|i| self.columns.get(i))
            .ok_or(MetadataError::IndexOutOfRange {
                index: position,
                count: self.columns.len(),
            })
    }

    /// Position of the column that claimed `label`.
    pub fn position_of_label(&self, label: &str) -> MetadataResult<usize> {
        self.labels
            .get(label)
            .and_then(|positions| positions.first().copied())
            .ok_or_else(|| MetadataError::UnknownColumn(label.to_string()))
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// Every position whose column carries `label`, in ordinal order.
    ///
    /// Only the first is reachable through [`position_of_label`].
    ///
    /// [`position_of_label`]: Self::position_of_label
    pub fn labels_for(&self, label: &str) -> &[usize] {
        self.labels.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The datasource defining `label`.
    ///
    /// Fails with `AmbiguousLabel` when more than one datasource defines it.
    pub fn datasource_of(&self, label: &str) -> MetadataResult<&str> {
        let positions = self
            .labels
            .get(label)
            .ok_or_else(|| MetadataError::UnknownColumn(label.to_string()))?;

        let mut owner: Option<&str> = None;
        for &position in positions {
            let datasource = self.columns[position - 1].datasource.as_str();
            match owner {
                Some(o) if o != datasource => {
                    return Err(MetadataError::AmbiguousLabel(label.to_string()))
                }
                _ => owner = Some(datasource),
            }
        }
        owner.ok_or_else(|| MetadataError::UnknownColumn(label.to_string()))
    }

    pub fn column_label(&self, position: usize) -> MetadataResult<&str> {
        Ok(&self.column_at(position)?.label)
    }

    pub fn column_name(&self, position: usize) -> MetadataResult<&str> {
        Ok(&self.column_at(position)?.name)
    }

    /// The datasource of the column.
    pub fn table_name(&self, position: usize) -> MetadataResult<&str> {
        Ok(&self.column_at(position)?.datasource)
    }

    /// Catalogs are not reported per column.
    pub fn catalog_name(&self, position: usize) -> MetadataResult<&str> {
        self.column_at(position)?;
        Ok("")
    }

    pub fn column_type(&self, position: usize) -> MetadataResult<JdbcType> {
        Ok(self.column_at(position)?.relational_type)
    }

    /// The primitive type name, `"bson"` for polymorphic columns.
    pub fn column_type_name(&self, position: usize) -> MetadataResult<&'static str> {
        Ok(self.column_at(position)?.primitive_type.name())
    }

    pub fn is_nullable(&self, position: usize) -> MetadataResult<Nullability> {
        Ok(self.column_at(position)?.nullability)
    }

    pub fn is_polymorphic(&self, position: usize) -> MetadataResult<bool> {
        Ok(self.column_at(position)?.is_polymorphic)
    }

    /// Type table entry of the column's primitive type.
    pub fn type_info(&self, position: usize) -> MetadataResult<&'static TypeInfo> {
        let column = self.column_at(position)?;
        Ok(self.types.get(column.primitive_type))
    }

    pub fn is_case_sensitive(&self, position: usize) -> MetadataResult<bool> {
        let column = self.column_at(position)?;
        Ok(column.is_polymorphic || self.types.get(column.primitive_type).case_sensitive)
    }

    pub fn is_signed(&self, position: usize) -> MetadataResult<bool> {
        let column = self.column_at(position)?;
        Ok(column.is_polymorphic || self.types.get(column.primitive_type).is_signed())
    }

    /// Column size; 0 for polymorphic and unbounded columns.
    pub fn precision(&self, position: usize) -> MetadataResult<u32> {
        let column = self.column_at(position)?;
        if column.is_polymorphic {
            return Ok(0);
        }
        Ok(self.types.get(column.primitive_type).precision.unwrap_or(0))
    }

    /// Maximum scale; 0 for polymorphic columns.
    pub fn scale(&self, position: usize) -> MetadataResult<u32> {
        let column = self.column_at(position)?;
        if column.is_polymorphic {
            return Ok(0);
        }
        Ok(self.types.get(column.primitive_type).max_scale)
    }

    pub fn display_size(&self, position: usize) -> MetadataResult<u32> {
        Ok(self.type_info(position)?.display_size())
    }

    pub fn is_searchable(&self, position: usize) -> MetadataResult<bool> {
        Ok(self.type_info(position)?.searchability.is_searchable())
    }

    /// Result sets are never updatable.
    pub fn is_read_only(&self, position: usize) -> MetadataResult<bool> {
        self.column_at(position)?;
        Ok(true)
    }
}

struct Builder {
    columns: Vec<ColumnDescriptor>,
    labels: HashMap<String, Vec<usize>>,
    types: &'static TypeTable,
}

impl Builder {
    fn new(types: &'static TypeTable) -> Self {
        Self {
            columns: Vec::new(),
            labels: HashMap::new(),
            types,
        }
    }

    fn push(
        &mut self,
        datasource: &str,
        object: &ObjectSchema,
        name: &str,
        node: &SchemaNode,
    ) -> MetadataResult<()> {
        let resolved = resolve_primitive_type(node)?;
        let nullability = resolve_nullability(object, name)?;
        let relational_type = self.types.get(resolved.primitive).jdbc_type;
        let ordinal_position = self.columns.len() + 1;

        trace!(
            datasource,
            column = name,
            ordinal_position,
            primitive = %resolved.primitive,
            "resolved column"
        );

        let positions = self.labels.entry(name.to_string()).or_default();
        if let Some(&first) = positions.first() {
            warn!(
                label = name,
                datasource,
                claimed_by = %self.columns[first - 1].datasource,
                ordinal_position,
                "label already claimed, column is reachable by position only"
            );
        }
        positions.push(ordinal_position);

        self.columns.push(ColumnDescriptor {
            datasource: datasource.to_string(),
            name: name.to_string(),
            label: name.to_string(),
            primitive_type: resolved.primitive,
            relational_type,
            nullability,
            is_polymorphic: resolved.polymorphic,
            ordinal_position,
        });
        Ok(())
    }

    fn finish(self) -> ResultSetMetadata {
        debug!(
            columns = self.columns.len(),
            labels = self.labels.len(),
            "built result set metadata"
        );
        ResultSetMetadata {
            columns: self.columns,
            labels: self.labels,
            types: self.types,
        }
    }
}
