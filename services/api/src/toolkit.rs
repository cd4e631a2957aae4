//! Lightweight SMILES toolkit behind the `ChemistryToolkit` seam.
//!
//! Parses the organic subset plus bracket atoms, builds the bond graph, and
//! derives descriptor estimates and a hashed circular fingerprint from it.
//! The normal form keeps the author's atom ordering rather than re-deriving
//! a graph-canonical one, and TPSA/logP are fragment-sum approximations.
//! Deployments that need exact RDKit-grade values swap a cheminformatics
//! binding in behind the same trait; nothing in the prediction core changes.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use excipient_ai::workflows::compatibility::{
    CanonicalStructure, ChemistryToolkit, MolecularDescriptors, StructureError, FINGERPRINT_BITS,
};

pub(crate) struct LightweightToolkit;

impl LightweightToolkit {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ChemistryToolkit for LightweightToolkit {
    fn canonicalize(&self, smiles: &str) -> Result<CanonicalStructure, StructureError> {
        let stripped: String = smiles.chars().filter(|c| !c.is_whitespace()).collect();
        parse(&stripped)?;
        Ok(CanonicalStructure::new(stripped))
    }

    fn fingerprint(&self, structure: &CanonicalStructure) -> Vec<u8> {
        let molecule = parse(structure.as_str()).expect("canonical structures re-parse");
        circular_fingerprint(&molecule)
    }

    fn descriptors(&self, structure: &CanonicalStructure) -> MolecularDescriptors {
        let molecule = parse(structure.as_str()).expect("canonical structures re-parse");
        molecule.descriptors()
    }
}

#[derive(Debug, Clone)]
struct Atom {
    element: String,
    aromatic: bool,
    /// H count inside a bracket atom; bracket atoms get no implicit hydrogens.
    explicit_h: u32,
    charge: i32,
    bracket: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    fn valence_units(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }

    fn tag(self) -> char {
        match self {
            BondOrder::Single => '-',
            BondOrder::Double => '=',
            BondOrder::Triple => '#',
            BondOrder::Aromatic => ':',
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bond {
    a: usize,
    b: usize,
    order: BondOrder,
    in_ring: bool,
    /// Ring-closure bonds appear once per ring, so they double as the ring
    /// count.
    closure: bool,
}

#[derive(Debug, Default)]
struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

fn fail(reason: impl Into<String>) -> StructureError {
    StructureError::Unparseable(reason.into())
}

fn atomic_mass(element: &str) -> Option<f64> {
    let mass = match element {
        "H" => 1.008,
        "Li" => 6.94,
        "B" => 10.81,
        "C" => 12.011,
        "N" => 14.007,
        "O" => 15.999,
        "F" => 18.998,
        "Na" => 22.990,
        "Mg" => 24.305,
        "Al" => 26.982,
        "Si" => 28.085,
        "P" => 30.974,
        "S" => 32.06,
        "Cl" => 35.45,
        "K" => 39.098,
        "Ca" => 40.078,
        "Fe" => 55.845,
        "Zn" => 65.38,
        "Se" => 78.971,
        "Br" => 79.904,
        "I" => 126.904,
        _ => return None,
    };
    Some(mass)
}

/// Default valences for the organic subset; only unbracketed atoms receive
/// implicit hydrogens.
fn default_valence(element: &str) -> f64 {
    match element {
        "B" | "N" | "P" => 3.0,
        "C" => 4.0,
        "O" | "S" => 2.0,
        _ => 1.0, // halogens
    }
}

fn parse(smiles: &str) -> Result<Molecule, StructureError> {
    if smiles.is_empty() {
        return Err(fail("empty structure descriptor"));
    }

    let chars: Vec<char> = smiles.chars().collect();
    let mut molecule = Molecule::default();
    // spanning-tree bookkeeping for ring-membership marking
    let mut parent: Vec<Option<(usize, usize)>> = Vec::new();
    let mut depth: Vec<u32> = Vec::new();

    let mut branch_stack: Vec<usize> = Vec::new();
    let mut prev_atom: Option<usize> = None;
    let mut pending_bond: Option<BondOrder> = None;
    let mut open_rings: HashMap<u32, (usize, Option<BondOrder>)> = HashMap::new();
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];
        match c {
            '(' => {
                let Some(prev) = prev_atom else {
                    return Err(fail("branch opened before any atom"));
                };
                if pending_bond.is_some() {
                    return Err(fail("bond symbol before '('"));
                }
                branch_stack.push(prev);
                index += 1;
            }
            ')' => {
                let Some(restored) = branch_stack.pop() else {
                    return Err(fail("unbalanced ')'"));
                };
                if pending_bond.is_some() {
                    return Err(fail("dangling bond symbol before ')'"));
                }
                prev_atom = Some(restored);
                index += 1;
            }
            '.' => {
                if pending_bond.is_some() {
                    return Err(fail("bond symbol before fragment separator"));
                }
                if prev_atom.is_none() {
                    return Err(fail("fragment separator without a preceding fragment"));
                }
                prev_atom = None;
                index += 1;
            }
            '-' | '/' | '\\' => {
                // cis/trans direction markers degrade to plain single bonds
                pending_bond = Some(BondOrder::Single);
                index += 1;
            }
            '=' => {
                pending_bond = Some(BondOrder::Double);
                index += 1;
            }
            '#' => {
                pending_bond = Some(BondOrder::Triple);
                index += 1;
            }
            ':' => {
                pending_bond = Some(BondOrder::Aromatic);
                index += 1;
            }
            '%' => {
                if index + 2 >= chars.len()
                    || !chars[index + 1].is_ascii_digit()
                    || !chars[index + 2].is_ascii_digit()
                {
                    return Err(fail("'%' ring bond needs two digits"));
                }
                let number = chars[index + 1].to_digit(10).unwrap_or(0) * 10
                    + chars[index + 2].to_digit(10).unwrap_or(0);
                close_or_open_ring(
                    number,
                    prev_atom,
                    &mut pending_bond,
                    &mut open_rings,
                    &mut molecule,
                    &parent,
                    &depth,
                )?;
                index += 3;
            }
            '0'..='9' => {
                let number = c.to_digit(10).unwrap_or(0);
                close_or_open_ring(
                    number,
                    prev_atom,
                    &mut pending_bond,
                    &mut open_rings,
                    &mut molecule,
                    &parent,
                    &depth,
                )?;
                index += 1;
            }
            '[' => {
                let Some(offset) = chars[index..].iter().position(|&ch| ch == ']') else {
                    return Err(fail("unclosed bracket atom"));
                };
                let atom = parse_bracket_atom(&chars[index + 1..index + offset])?;
                attach_atom(
                    atom,
                    &mut molecule,
                    &mut parent,
                    &mut depth,
                    &mut prev_atom,
                    &mut pending_bond,
                )?;
                index += offset + 1;
            }
            _ => {
                let (atom, consumed) = parse_organic_atom(&chars[index..])?;
                attach_atom(
                    atom,
                    &mut molecule,
                    &mut parent,
                    &mut depth,
                    &mut prev_atom,
                    &mut pending_bond,
                )?;
                index += consumed;
            }
        }
    }

    if !branch_stack.is_empty() {
        return Err(fail("unbalanced '('"));
    }
    if let Some(number) = open_rings.keys().next() {
        return Err(fail(format!("unclosed ring bond {number}")));
    }
    if pending_bond.is_some() {
        return Err(fail("dangling bond symbol at end of input"));
    }
    if molecule.atoms.is_empty() {
        return Err(fail("no atoms"));
    }

    Ok(molecule)
}

fn parse_organic_atom(rest: &[char]) -> Result<(Atom, usize), StructureError> {
    let two: String = rest.iter().take(2).collect();
    if two == "Cl" || two == "Br" {
        return Ok((plain_atom(&two, false), 2));
    }

    let c = rest[0];
    let atom = match c {
        'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' => plain_atom(&c.to_string(), false),
        'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
            plain_atom(&c.to_ascii_uppercase().to_string(), true)
        }
        _ => return Err(fail(format!("unexpected character '{c}'"))),
    };
    Ok((atom, 1))
}

fn plain_atom(element: &str, aromatic: bool) -> Atom {
    Atom {
        element: element.to_string(),
        aromatic,
        explicit_h: 0,
        charge: 0,
        bracket: false,
    }
}

fn parse_bracket_atom(inner: &[char]) -> Result<Atom, StructureError> {
    let mut j = 0;

    // isotope label, ignored
    while j < inner.len() && inner[j].is_ascii_digit() {
        j += 1;
    }
    if j >= inner.len() {
        return Err(fail("bracket atom without an element symbol"));
    }

    let (element, aromatic) = if inner[j].is_ascii_uppercase() {
        let mut symbol = inner[j].to_string();
        if j + 1 < inner.len() && inner[j + 1].is_ascii_lowercase() {
            symbol.push(inner[j + 1]);
            j += 2;
        } else {
            j += 1;
        }
        (symbol, false)
    } else if inner[j] == 's' && j + 1 < inner.len() && inner[j + 1] == 'e' {
        j += 2;
        ("Se".to_string(), true)
    } else if matches!(inner[j], 'b' | 'c' | 'n' | 'o' | 'p' | 's') {
        let symbol = inner[j].to_ascii_uppercase().to_string();
        j += 1;
        (symbol, true)
    } else {
        return Err(fail(format!("unexpected '{}' in bracket atom", inner[j])));
    };

    if atomic_mass(&element).is_none() {
        return Err(fail(format!("unsupported element '{element}'")));
    }

    while j < inner.len() && inner[j] == '@' {
        j += 1;
    }

    let mut explicit_h = 0;
    if j < inner.len() && inner[j] == 'H' {
        j += 1;
        let mut count = 0;
        let mut digits = 0;
        while j < inner.len() && inner[j].is_ascii_digit() {
            count = count * 10 + inner[j].to_digit(10).unwrap_or(0);
            digits += 1;
            j += 1;
        }
        explicit_h = if digits == 0 { 1 } else { count };
    }

    let mut charge = 0i32;
    while j < inner.len() && (inner[j] == '+' || inner[j] == '-') {
        let sign = if inner[j] == '+' { 1 } else { -1 };
        j += 1;
        let mut magnitude = 0i32;
        let mut digits = 0;
        while j < inner.len() && inner[j].is_ascii_digit() {
            magnitude = magnitude * 10 + inner[j].to_digit(10).unwrap_or(0) as i32;
            digits += 1;
            j += 1;
        }
        charge += sign * if digits == 0 { 1 } else { magnitude };
    }

    // atom-map class, ignored
    if j < inner.len() && inner[j] == ':' {
        j += 1;
        let start = j;
        while j < inner.len() && inner[j].is_ascii_digit() {
            j += 1;
        }
        if j == start {
            return Err(fail("atom map ':' without digits"));
        }
    }

    if j != inner.len() {
        return Err(fail(format!("unexpected '{}' in bracket atom", inner[j])));
    }

    Ok(Atom {
        element,
        aromatic,
        explicit_h,
        charge,
        bracket: true,
    })
}

fn attach_atom(
    atom: Atom,
    molecule: &mut Molecule,
    parent: &mut Vec<Option<(usize, usize)>>,
    depth: &mut Vec<u32>,
    prev_atom: &mut Option<usize>,
    pending_bond: &mut Option<BondOrder>,
) -> Result<(), StructureError> {
    let new_index = molecule.atoms.len();
    let aromatic = atom.aromatic;
    molecule.atoms.push(atom);

    match *prev_atom {
        Some(prev) => {
            let order = pending_bond.take().unwrap_or({
                if aromatic && molecule.atoms[prev].aromatic {
                    BondOrder::Aromatic
                } else {
                    BondOrder::Single
                }
            });
            let bond_index = molecule.bonds.len();
            molecule.bonds.push(Bond {
                a: prev,
                b: new_index,
                order,
                in_ring: false,
                closure: false,
            });
            parent.push(Some((prev, bond_index)));
            depth.push(depth[prev] + 1);
        }
        None => {
            if pending_bond.is_some() {
                return Err(fail("bond symbol with no preceding atom"));
            }
            parent.push(None);
            depth.push(0);
        }
    }

    *prev_atom = Some(new_index);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn close_or_open_ring(
    number: u32,
    prev_atom: Option<usize>,
    pending_bond: &mut Option<BondOrder>,
    open_rings: &mut HashMap<u32, (usize, Option<BondOrder>)>,
    molecule: &mut Molecule,
    parent: &[Option<(usize, usize)>],
    depth: &[u32],
) -> Result<(), StructureError> {
    let Some(current) = prev_atom else {
        return Err(fail("ring bond digit before any atom"));
    };

    match open_rings.remove(&number) {
        Some((partner, opening_bond)) => {
            if partner == current {
                return Err(fail(format!("ring bond {number} closes on its own atom")));
            }
            let order = pending_bond
                .take()
                .or(opening_bond)
                .unwrap_or({
                    if molecule.atoms[partner].aromatic && molecule.atoms[current].aromatic {
                        BondOrder::Aromatic
                    } else {
                        BondOrder::Single
                    }
                });
            molecule.bonds.push(Bond {
                a: partner,
                b: current,
                order,
                in_ring: true,
                closure: true,
            });
            mark_ring_path(partner, current, molecule, parent, depth);
        }
        None => {
            open_rings.insert(number, (current, pending_bond.take()));
        }
    }

    Ok(())
}

/// Atoms and chain bonds form a spanning tree, so the cycle a ring-closure
/// bond creates is exactly the closure plus the tree path between its
/// endpoints. Walk both ends up to their common ancestor and flag the
/// traversed bonds as ring members.
fn mark_ring_path(
    mut a: usize,
    mut b: usize,
    molecule: &mut Molecule,
    parent: &[Option<(usize, usize)>],
    depth: &[u32],
) {
    while depth[a] > depth[b] {
        if let Some((up, bond_index)) = parent[a] {
            molecule.bonds[bond_index].in_ring = true;
            a = up;
        } else {
            return;
        }
    }
    while depth[b] > depth[a] {
        if let Some((up, bond_index)) = parent[b] {
            molecule.bonds[bond_index].in_ring = true;
            b = up;
        } else {
            return;
        }
    }
    while a != b {
        match (parent[a], parent[b]) {
            (Some((up_a, bond_a)), Some((up_b, bond_b))) => {
                molecule.bonds[bond_a].in_ring = true;
                molecule.bonds[bond_b].in_ring = true;
                a = up_a;
                b = up_b;
            }
            _ => return,
        }
    }
}

impl Molecule {
    fn degree(&self, atom: usize) -> usize {
        self.bonds
            .iter()
            .filter(|bond| bond.a == atom || bond.b == atom)
            .count()
    }

    fn bond_order_sum(&self, atom: usize) -> f64 {
        self.bonds
            .iter()
            .filter(|bond| bond.a == atom || bond.b == atom)
            .map(|bond| bond.order.valence_units())
            .sum()
    }

    /// Implicit hydrogens for unbracketed organic-subset atoms.
    fn hydrogens(&self, atom: usize) -> u32 {
        let data = &self.atoms[atom];
        if data.bracket {
            return data.explicit_h;
        }
        let used = self.bond_order_sum(atom).ceil();
        let spare = default_valence(&data.element) - used;
        if spare > 0.0 {
            spare as u32
        } else {
            0
        }
    }

    fn is_donor_candidate(&self, atom: usize) -> bool {
        matches!(self.atoms[atom].element.as_str(), "N" | "O")
    }

    fn descriptors(&self) -> MolecularDescriptors {
        let mut molecular_weight = 0.0;
        let mut log_p = 0.0;
        let mut tpsa = 0.0;
        let mut h_donors = 0;
        let mut h_acceptors = 0;
        let mut heavy_atoms = 0;

        for (index, atom) in self.atoms.iter().enumerate() {
            if atom.element == "H" {
                molecular_weight += 1.008;
                continue;
            }
            heavy_atoms += 1;

            let hydrogens = self.hydrogens(index);
            molecular_weight +=
                atomic_mass(&atom.element).unwrap_or(0.0) + f64::from(hydrogens) * 1.008;

            if self.is_donor_candidate(index) {
                h_acceptors += 1;
                if hydrogens > 0 {
                    h_donors += 1;
                }
                tpsa += polar_surface_contribution(&atom.element, hydrogens);
            }

            log_p += log_p_contribution(atom, hydrogens);
        }

        let rotatable_bonds = self
            .bonds
            .iter()
            .filter(|bond| {
                bond.order == BondOrder::Single
                    && !bond.in_ring
                    && self.degree(bond.a) > 1
                    && self.degree(bond.b) > 1
            })
            .count() as u32;

        let aromatic_rings = self
            .bonds
            .iter()
            .filter(|bond| {
                bond.closure
                    && bond.order == BondOrder::Aromatic
                    && self.atoms[bond.a].aromatic
                    && self.atoms[bond.b].aromatic
            })
            .count() as u32;

        MolecularDescriptors {
            molecular_weight,
            log_p,
            h_donors,
            h_acceptors,
            tpsa,
            rotatable_bonds,
            aromatic_rings,
            heavy_atoms,
        }
    }
}

fn polar_surface_contribution(element: &str, hydrogens: u32) -> f64 {
    match (element, hydrogens > 0) {
        ("N", true) => 26.02,
        ("N", false) => 12.89,
        ("O", true) => 20.23,
        ("O", false) => 17.07,
        _ => 0.0,
    }
}

fn log_p_contribution(atom: &Atom, hydrogens: u32) -> f64 {
    let base = match atom.element.as_str() {
        "C" => {
            if atom.aromatic {
                0.30
            } else {
                0.20
            }
        }
        "N" => -0.60,
        "O" => -0.55,
        "S" => 0.45,
        "P" => -0.30,
        "F" => 0.20,
        "Cl" => 0.65,
        "Br" => 0.86,
        "I" => 1.20,
        _ => -0.50, // metals and other inorganics drag solubility up
    };
    let polar_h = if matches!(atom.element.as_str(), "N" | "O") {
        f64::from(hydrogens) * 0.10
    } else {
        0.0
    };
    base - polar_h
}

fn atom_invariant(molecule: &Molecule, atom: usize) -> String {
    let data = &molecule.atoms[atom];
    format!(
        "{}{}{}{}{}",
        data.element,
        if data.aromatic { "a" } else { "A" },
        molecule.degree(atom),
        data.charge,
        molecule.hydrogens(atom),
    )
}

/// Hashed circular fingerprint over atom environments of radius 0..=2,
/// folded into [`FINGERPRINT_BITS`] bits.
fn circular_fingerprint(molecule: &Molecule) -> Vec<u8> {
    let mut bits = vec![0u8; FINGERPRINT_BITS];
    let mut set = |text: &str| {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        bits[(hasher.finish() as usize) % FINGERPRINT_BITS] = 1;
    };

    let invariants: Vec<String> = (0..molecule.atoms.len())
        .map(|atom| atom_invariant(molecule, atom))
        .collect();

    let neighborhoods: Vec<Vec<(char, usize)>> = (0..molecule.atoms.len())
        .map(|atom| {
            molecule
                .bonds
                .iter()
                .filter_map(|bond| {
                    if bond.a == atom {
                        Some((bond.order.tag(), bond.b))
                    } else if bond.b == atom {
                        Some((bond.order.tag(), bond.a))
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect();

    let radius_one: Vec<String> = (0..molecule.atoms.len())
        .map(|atom| {
            let mut shells: Vec<String> = neighborhoods[atom]
                .iter()
                .map(|(tag, neighbor)| format!("{tag}{}", invariants[*neighbor]))
                .collect();
            shells.sort();
            format!("{}|{}", invariants[atom], shells.join(","))
        })
        .collect();

    for atom in 0..molecule.atoms.len() {
        set(&invariants[atom]);
        set(&radius_one[atom]);

        let mut outer: Vec<String> = neighborhoods[atom]
            .iter()
            .map(|(tag, neighbor)| format!("{tag}{}", radius_one[*neighbor]))
            .collect();
        outer.sort();
        set(&format!("{}||{}", radius_one[atom], outer.join(",")));
    }

    bits
}
