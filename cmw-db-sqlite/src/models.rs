use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = kv_store)]
pub struct NewKeyValue<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub revision: i64,
}
