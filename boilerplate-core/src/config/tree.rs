use serde_json::{Map, Value};

pub(crate) fn get_path_value<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let mut cursor = raw;
    for key in keys {
        let object = cursor.as_object()?;
        cursor = object.get(*key)?;
    }
    Some(cursor)
}

pub(crate) fn set_path_value_in_object(object: &mut Map<String, Value>, keys: &[&str], value: Value) {
    let Some((key, rest)) = keys.split_first() else {
        return;
    };
    if rest.is_empty() {
        object.insert((*key).to_owned(), value);
        return;
    }

    let entry = object
        .entry((*key).to_owned())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(child) = entry {
        set_path_value_in_object(child, rest, value);
    }
}
