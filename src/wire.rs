use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ResultSetsDocument {
    pub result_sets: Vec<ResultSetPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ResultSetPayload {
    #[serde(default)]
    pub cols: Vec<Col>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

/// Column descriptor; keys other than `name` are ignored.
#[derive(Debug, Deserialize)]
pub struct Col {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Value {
    Null {},
    Integer { value: String },
    Float { value: String },
    Text { value: String },
    Datetime { value: String },
}
