//! Calculation methods and Asr schools understood by AlAdhan.

/// Calculation method ids and names.
pub const CALCULATION_METHODS: &[(u8, &str)] = &[
    (0, "Jafari / Shia Ithna-Ashari"),
    (1, "University of Islamic Sciences, Karachi"),
    (2, "Islamic Society of North America"),
    (3, "Muslim World League"),
    (4, "Umm Al-Qura University, Makkah"),
    (5, "Egyptian General Authority of Survey"),
    (7, "Institute of Geophysics, University of Tehran"),
    (8, "Gulf Region"),
    (9, "Kuwait"),
    (10, "Qatar"),
    (11, "Majlis Ugama Islam Singapura, Singapore"),
    (12, "Union Organization Islamic de France"),
    (13, "Diyanet İşleri Başkanlığı, Turkey"),
    (14, "Spiritual Administration of Muslims of Russia"),
    (15, "Moonsighting Committee Worldwide"),
    (16, "Dubai"),
    (17, "Jabatan Kemajuan Islam Malaysia (JAKIM)"),
    (18, "Tunisia"),
    (19, "Algeria"),
    (20, "Kementerian Agama Republik Indonesia"),
    (21, "Morocco"),
    (22, "Comunidade Islamica de Lisboa"),
    (23, "Ministry of Awqaf, Islamic Affairs and Holy Places, Jordan"),
];

/// Asr juristic schools.
pub const SCHOOLS: &[(u8, &str)] = &[(0, "Shafi"), (1, "Hanafi")];

pub fn method_name(id: u8) -> Option<&'static str> {
    lookup(CALCULATION_METHODS, id)
}

pub fn school_name(id: u8) -> Option<&'static str> {
    lookup(SCHOOLS, id)
}

fn lookup(table: &[(u8, &'static str)], id: u8) -> Option<&'static str> {
    table.iter().find(|(i, _)| *i == id).map(|(_, name)| *name)
}
