//! Test fixtures for `tf_mapper` (compiled only during testing).

use crate::schema::{Attribute, Elem, Schema, ValueType};

pub struct WeaponStats {
    pub power: i64,
    pub range: i64,
    pub rate_of_fire: i64,
    pub adjective: String,
    pub is_op: bool,
}

crate::tagged! {
    WeaponStats {
        power => [terraform = "power_value"],
        range => [terraform = "range_value"],
        rate_of_fire => [terraform = "rof"],
        adjective => [terraform = "adj"],
        is_op => [terraform = "is_op"],
    }
}

pub struct Weapon {
    pub weapon_id: String,
    pub name: String,
    pub manufacturer: String,
    pub stats: WeaponStats,
    pub power_up_costs: Vec<i64>,
    pub something_with_no_tag: i64,
}

crate::tagged! {
    Weapon {
        weapon_id => [terraform = "id"],
        name => [terraform = "name"],
        manufacturer => [terraform = "manufacturer_name"],
        stats => [terraform = "stats"],
        power_up_costs => [terraform = "power_up_costs"],
        something_with_no_tag => [notthetagyourelookingfor = "lol"],
    }
}

pub fn kensa_splat_roller() -> Weapon {
    Weapon {
        weapon_id: "TK1337".into(),
        name: "Kensa Splat Roller".into(),
        manufacturer: "Toni Kensa".into(),
        stats: WeaponStats {
            power: 100,
            range: 5,
            rate_of_fire: 35,
            adjective: "groovy".into(),
            is_op: true,
        },
        power_up_costs: vec![5, 10, 15, 20, 25],
        something_with_no_tag: 0,
    }
}

pub fn stats_schema() -> Schema {
    Schema::new()
        .with_attribute("power_value", Attribute::optional(ValueType::Int))
        .with_attribute("range_value", Attribute::optional(ValueType::Int))
        .with_attribute("rof", Attribute::optional(ValueType::Int))
        .with_attribute("adj", Attribute::optional(ValueType::String))
        .with_attribute("is_op", Attribute::optional(ValueType::Bool))
}

pub fn widget_schema() -> Schema {
    Schema::new()
        .with_attribute("name", Attribute::required(ValueType::String))
        .with_attribute("manufacturer_name", Attribute::required(ValueType::String))
        .with_attribute("stats", Attribute::single_block(stats_schema()))
        .with_attribute(
            "power_up_costs",
            Attribute::optional(ValueType::List).with_elem(Elem::Type(ValueType::Int)),
        )
}
