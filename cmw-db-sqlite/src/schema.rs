table! {
    kv_store (key) {
        key -> Text,
        value -> Text,
        revision -> BigInt,
    }
}
