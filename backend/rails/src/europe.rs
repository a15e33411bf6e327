use crate::board::Route;
use crate::card::WagonColor;
use crate::city::City;
use crate::destination::{Destination, DestinationLength};

/// `Any` stands for a route that can be claimed with cards of any single color.
macro_rules! route_color {
    (Any) => {
        None
    };
    ($color:ident) => {
        Some(WagonColor::$color)
    };
}

/// Convenience macro to generate the routes between two cities, one per listed color.
macro_rules! routes {
    ($(($start:ident, $end:ident): $length:literal, [$($color:ident),+]);* $(;)?) => {
        vec![$($(Route::new((City::$start, City::$end), route_color!($color), $length)),+),*]
    };
}

macro_rules! destinations {
    ($length:ident; $(($start:ident, $end:ident): $points:literal),* $(,)?) => {
        vec![$(Destination {
            destination: (City::$start, City::$end),
            points: $points,
            length: DestinationLength::$length,
        }),*]
    };
}

/// All routes of the Europe map, unclaimed. Parallel routes are listed as separate entries.
pub fn routes() -> Vec<Route> {
    routes! {
        // Western Europe.
        (Edinburgh, London): 4, [Black, Orange];
        (London, Amsterdam): 2, [Any];
        (London, Dieppe): 2, [Any, Any];
        (Brest, Dieppe): 2, [Orange];
        (Brest, Paris): 3, [Black];
        (Brest, Pamplona): 4, [Pink];
        (Dieppe, Paris): 1, [Pink];
        (Dieppe, Bruxelles): 2, [Green];
        (Bruxelles, Amsterdam): 1, [Black];
        (Bruxelles, Paris): 2, [Yellow, Red];
        (Bruxelles, Frankfurt): 2, [Blue];
        (Amsterdam, Essen): 3, [Yellow];
        (Amsterdam, Frankfurt): 2, [White];
        (Paris, Frankfurt): 3, [White, Orange];
        (Paris, Zurich): 3, [Any];
        (Paris, Marseille): 4, [Any];
        (Paris, Pamplona): 4, [Blue, Green];
        // Iberia.
        (Pamplona, Madrid): 3, [Black, White];
        (Pamplona, Barcelona): 2, [Any];
        (Pamplona, Marseille): 4, [Red];
        (Madrid, Lisboa): 3, [Pink];
        (Madrid, Cadiz): 3, [Orange];
        (Madrid, Barcelona): 2, [Yellow];
        (Lisboa, Cadiz): 2, [Blue];
        (Barcelona, Marseille): 4, [Any];
        // Alps and Italy.
        (Marseille, Zurich): 2, [Pink];
        (Marseille, Roma): 4, [Any];
        (Zurich, Munchen): 2, [Yellow];
        (Zurich, Venezia): 2, [Green];
        (Munchen, Venezia): 2, [Blue];
        (Munchen, Wien): 3, [Orange];
        (Venezia, Roma): 2, [Black];
        (Venezia, Zagrab): 2, [Any];
        (Roma, Brindisi): 2, [White];
        (Roma, Palermo): 4, [Any];
        (Palermo, Brindisi): 3, [Any];
        (Palermo, Smyrna): 6, [Any];
        (Brindisi, Athina): 4, [Any];
        // Central Europe.
        (Frankfurt, Essen): 2, [Green];
        (Frankfurt, Berlin): 3, [Black, Red];
        (Frankfurt, Munchen): 2, [Pink];
        (Essen, Berlin): 2, [Blue];
        (Essen, Kobenhavn): 3, [Any, Any];
        (Kobenhavn, Stockholm): 3, [Yellow, White];
        (Stockholm, Petrograd): 8, [Any];
        (Berlin, Danzig): 4, [Any];
        (Berlin, Warszawa): 4, [Pink, Yellow];
        (Berlin, Wien): 3, [Green];
        (Wien, Zagrab): 2, [Any];
        (Wien, Budapest): 1, [Red, White];
        (Wien, Warszawa): 4, [Blue];
        // The Balkans and Anatolia.
        (Zagrab, Budapest): 2, [Orange];
        (Zagrab, Sarajevo): 3, [Red];
        (Budapest, Sarajevo): 3, [Pink];
        (Budapest, Bucuresti): 4, [Any];
        (Budapest, Kyiv): 6, [Any];
        (Sarajevo, Sofia): 2, [Any];
        (Sarajevo, Athina): 4, [Green];
        (Athina, Sofia): 3, [Pink];
        (Athina, Smyrna): 2, [Any];
        (Sofia, Bucuresti): 2, [Any];
        (Sofia, Constantinople): 3, [Blue];
        (Bucuresti, Constantinople): 3, [Yellow];
        (Bucuresti, Kyiv): 4, [Any];
        (Bucuresti, Sevastopol): 4, [White];
        (Constantinople, Sevastopol): 4, [Any];
        (Constantinople, Smyrna): 2, [Any];
        (Constantinople, Angora): 2, [Any];
        (Smyrna, Angora): 3, [Orange];
        (Angora, Erzurum): 3, [Black];
        (Erzurum, Sevastopol): 4, [Any];
        (Erzurum, Sochi): 3, [Red];
        // Eastern Europe.
        (Sevastopol, Sochi): 2, [Any];
        (Sevastopol, Rostov): 4, [Any];
        (Sochi, Rostov): 2, [Any];
        (Rostov, Kharkov): 2, [Green];
        (Kharkov, Kyiv): 4, [Any];
        (Kharkov, Moskva): 4, [Any];
        (Moskva, Smolensk): 2, [Orange];
        (Moskva, Petrograd): 4, [White];
        (Smolensk, Kyiv): 3, [Red];
        (Smolensk, Wilno): 3, [Yellow];
        (Kyiv, Wilno): 2, [Any];
        (Kyiv, Warszawa): 4, [Any];
        (Wilno, Warszawa): 3, [Red];
        (Wilno, Riga): 4, [Green];
        (Wilno, Petrograd): 4, [Blue];
        (Riga, Petrograd): 4, [Any];
        (Riga, Danzig): 3, [Black];
        (Danzig, Warszawa): 2, [Any];
    }
}

/// The 40 short destinations of the Europe map.
pub fn short_destinations() -> Vec<Destination> {
    destinations! {
        Short;
        (Amsterdam, Pamplona): 7,
        (Amsterdam, Wilno): 12,
        (Angora, Kharkov): 10,
        (Athina, Angora): 5,
        (Athina, Wilno): 11,
        (Barcelona, Bruxelles): 8,
        (Barcelona, Munchen): 8,
        (Berlin, Bucuresti): 8,
        (Berlin, Moskva): 12,
        (Berlin, Roma): 9,
        (Brest, Marseille): 7,
        (Brest, Venezia): 8,
        (Bruxelles, Danzig): 9,
        (Budapest, Sofia): 5,
        (Edinburgh, Paris): 7,
        (Essen, Kyiv): 10,
        (Frankfurt, Kobenhavn): 5,
        (Frankfurt, Smolensk): 13,
        (Kyiv, Petrograd): 6,
        (Kyiv, Sochi): 8,
        (London, Berlin): 7,
        (London, Wien): 10,
        (Madrid, Dieppe): 8,
        (Madrid, Zurich): 8,
        (Marseille, Essen): 8,
        (Palermo, Constantinople): 8,
        (Paris, Wien): 8,
        (Paris, Zagrab): 7,
        (Riga, Bucuresti): 10,
        (Roma, Smyrna): 8,
        (Rostov, Erzurum): 5,
        (Sarajevo, Sevastopol): 8,
        (Smolensk, Rostov): 8,
        (Sofia, Smyrna): 5,
        (Stockholm, Wien): 11,
        (Venezia, Constantinople): 10,
        (Warszawa, Smolensk): 6,
        (Zagrab, Brindisi): 6,
        (Zurich, Brindisi): 6,
        (Zurich, Budapest): 6,
    }
}

/// The 6 long destinations of the Europe map.
pub fn long_destinations() -> Vec<Destination> {
    destinations! {
        Long;
        (Brest, Petrograd): 20,
        (Cadiz, Stockholm): 21,
        (Edinburgh, Athina): 21,
        (Kobenhavn, Erzurum): 21,
        (Lisboa, Danzig): 20,
        (Palermo, Moskva): 20,
    }
}
