use serde_repr::{Deserialize_repr, Serialize_repr};
#[allow(unused_imports)]
use strum::EnumCount;
use strum_macros::{Display, EnumCount as EnumCountMacro};

/// All the different cities on the Europe map.
///
/// # JSON
/// Cities are serialized as an 8-bit unsigned integer.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize_repr,
    Display,
    EnumCountMacro,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Serialize_repr,
)]
#[repr(u8)]
pub enum City {
    Amsterdam = 0,
    Angora = 1,
    Athina = 2,
    Barcelona = 3,
    Berlin = 4,
    Brest = 5,
    Brindisi = 6,
    Bruxelles = 7,
    Bucuresti = 8,
    Budapest = 9,
    Cadiz = 10,
    Constantinople = 11,
    Danzig = 12,
    Dieppe = 13,
    Edinburgh = 14,
    Erzurum = 15,
    Essen = 16,
    Frankfurt = 17,
    Kharkov = 18,
    #[strum(serialize = "København")]
    Kobenhavn = 19,
    Kyiv = 20,
    Lisboa = 21,
    London = 22,
    Madrid = 23,
    Marseille = 24,
    Moskva = 25,
    #[strum(serialize = "München")]
    Munchen = 26,
    Palermo = 27,
    Pamplona = 28,
    Paris = 29,
    Petrograd = 30,
    Riga = 31,
    Roma = 32,
    Rostov = 33,
    Sarajevo = 34,
    Sevastopol = 35,
    Smolensk = 36,
    Smyrna = 37,
    Sochi = 38,
    Sofia = 39,
    Stockholm = 40,
    Venezia = 41,
    Warszawa = 42,
    Wien = 43,
    Wilno = 44,
    Zagrab = 45,
    #[strum(serialize = "Zürich")]
    Zurich = 46,
}

/// Top-level representation of a connection between two cities.
pub type CityToCity = (City, City);
