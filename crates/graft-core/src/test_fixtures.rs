//! Derived record types shared by unit tests.
use graft_derive::Record;
use std::{rc::Rc, sync::Arc};

///
/// Asset
/// Association target keyed by a text serial number.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct Asset {
    #[record(rename = "SerialNumber")]
    pub(crate) serial_number: String,

    #[record(rename = "Model")]
    pub(crate) model: String,

    #[record(rename = "V")]
    pub(crate) version: i64,
}

impl Asset {
    pub(crate) fn new(serial: &str, version: i64) -> Self {
        Self {
            serial_number: serial.to_string(),
            model: format!("model-{serial}"),
            version,
        }
    }
}

///
/// Device
/// Owning record with a tagged, an untagged and a half-tagged association.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct Device {
    #[record(rename = "ID")]
    pub(crate) id: u64,

    #[record(rename = "AssetSn")]
    pub(crate) asset_sn: String,

    #[record(rename = "Asset", preload = "foreignkey:AssetSn;primarykey:SerialNumber")]
    pub(crate) asset: Option<Asset>,

    #[record(rename = "Untagged")]
    pub(crate) untagged: Option<Box<Asset>>,

    #[record(rename = "Broken", preload = "foreignkey:AssetSn")]
    pub(crate) broken: Option<Box<Asset>>,

    #[record(skip)]
    pub(crate) scratch: Vec<u8>,
}

impl Device {
    pub(crate) fn new(id: u64, asset_sn: &str) -> Self {
        Self {
            id,
            asset_sn: asset_sn.to_string(),
            ..Self::default()
        }
    }
}

///
/// Rack
/// Association held without an optional layer.
///

#[derive(Clone, Debug, Default, Record)]
pub(crate) struct Rack {
    #[record(rename = "AssetSn")]
    pub(crate) asset_sn: String,

    #[record(rename = "Asset", preload = "foreignkey:AssetSn;primarykey:SerialNumber")]
    pub(crate) asset: Box<Asset>,
}

///
/// Owner
/// Association target keyed by an integer with a column override.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct Owner {
    #[record(rename = "ID", column = "owner_id")]
    pub(crate) id: u64,

    #[record(rename = "Name")]
    pub(crate) name: String,
}

impl Owner {
    pub(crate) fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

///
/// Ticket
/// Owning record with shared associations and a numeric foreign key.
///

#[derive(Clone, Debug, Default, Record)]
pub(crate) struct Ticket {
    #[record(rename = "OwnerID")]
    pub(crate) owner_id: u64,

    #[record(rename = "Owner", preload = "foreignkey:OwnerID;primarykey:ID")]
    pub(crate) owner: Option<Arc<Owner>>,

    #[record(rename = "Reviewer", preload = "foreignkey:OwnerID;primarykey:ID")]
    pub(crate) reviewer: Option<Rc<Owner>>,
}

impl Ticket {
    pub(crate) fn new(owner_id: u64) -> Self {
        Self {
            owner_id,
            ..Self::default()
        }
    }
}

///
/// Account / Order
/// Signed primary key joined from an unsigned foreign key.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct Account {
    #[record(rename = "ID")]
    pub(crate) id: i64,
}

#[derive(Clone, Debug, Default, Record)]
pub(crate) struct Order {
    #[record(rename = "AccountID")]
    pub(crate) account_id: u32,

    #[record(rename = "Account", preload = "foreignkey:AccountID;primarykey:ID")]
    pub(crate) account: Option<Account>,
}

///
/// Person / PersonView
/// Mapping source and a differently-cased destination.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct Person {
    #[record(rename = "Name")]
    pub(crate) name: String,

    #[record(rename = "Age")]
    pub(crate) age: u32,

    #[record(rename = "Email")]
    pub(crate) email: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct PersonView {
    pub(crate) name: String,
    pub(crate) age: i64,
    pub(crate) nickname: String,
}

///
/// DeviceView / AssetView
/// Destination with a nested record of a different type.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct AssetView {
    pub(crate) serialnumber: String,
    pub(crate) v: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Record)]
pub(crate) struct DeviceView {
    pub(crate) id: u64,
    pub(crate) asset: Option<AssetView>,
}

///
/// AgeAsText
/// Destination whose `age` cannot hold a number.
///

#[derive(Clone, Debug, Default, Record)]
pub(crate) struct AgeAsText {
    pub(crate) age: String,
}
