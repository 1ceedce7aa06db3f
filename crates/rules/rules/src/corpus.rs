//! The built-in cardiovascular risk rule set.
//!
//! Rules are named `R1` through `R105` in declaration order. `R1`..`R40` yield
//! [`Verdict::High`], `R41`..`R75` yield [`Verdict::Moderate`] and
//! `R76`..`R105` yield [`Verdict::Low`]. `R56` repeats the condition of `R44`
//! and can never be the first match; it is kept so the corpus stays
//! complete.

use std::sync::OnceLock;

use cardio_core::Attribute::{ColdSweat, Diabetes, Dizziness, Fatigue, FamilyHistory, ShortBreath};
use cardio_core::{Attribute, Verdict};

use crate::engine::executor::RuleEngine;
use crate::ir::expr::{Expr, all, eq, ne, one_of};
use crate::ir::rule::{Rule, RuleSource};

const YOUNG: &str = "Young Adult";
const MIDDLE_AGED: &str = "Middle-Aged Adult";
const ELDERLY: &str = "Elderly";

fn age(value: &str) -> Expr {
    eq(Attribute::AgeGroup, value)
}

fn not_age(value: &str) -> Expr {
    ne(Attribute::AgeGroup, value)
}

fn male() -> Expr {
    eq(Attribute::Gender, "Male")
}

fn female() -> Expr {
    eq(Attribute::Gender, "Female")
}

fn pain(value: &str) -> Expr {
    eq(Attribute::ChestPain, value)
}

fn yes(attribute: Attribute) -> Expr {
    eq(attribute, "Yes")
}

fn no(attribute: Attribute) -> Expr {
    eq(attribute, "No")
}

fn smoker() -> Expr {
    eq(Attribute::Smoker, "Smoker")
}

fn non_smoker() -> Expr {
    eq(Attribute::Smoker, "Non-Smoker")
}

fn bp(value: &str) -> Expr {
    eq(Attribute::BloodPressure, value)
}

fn inactive() -> Expr {
    eq(Attribute::Inactive, "Physically Inactive")
}

fn active() -> Expr {
    eq(Attribute::Inactive, "Active")
}

fn rule<const N: usize>(
    verdict: Verdict,
    name: &str,
    description: &str,
    conditions: [Expr; N],
) -> Rule {
    Rule::new(name, all(conditions), verdict)
        .with_description(description)
        .with_source(RuleSource::Builtin)
}

fn high<const N: usize>(name: &str, description: &str, conditions: [Expr; N]) -> Rule {
    rule(Verdict::High, name, description, conditions)
}

fn moderate<const N: usize>(name: &str, description: &str, conditions: [Expr; N]) -> Rule {
    rule(Verdict::Moderate, name, description, conditions)
}

fn low<const N: usize>(name: &str, description: &str, conditions: [Expr; N]) -> Rule {
    rule(Verdict::Low, name, description, conditions)
}

/// The built-in rules in declaration order.
#[allow(clippy::too_many_lines)]
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        // High risk.
        high(
            "R1",
            "Severe chest pain with breathlessness and high blood pressure",
            [pain("Severe"), yes(ShortBreath), bp("High")],
        ),
        high(
            "R2",
            "Severe chest pain with cold sweats and dizziness",
            [pain("Severe"), yes(ColdSweat), yes(Dizziness)],
        ),
        high(
            "R3",
            "Severe chest pain in an elderly patient",
            [pain("Severe"), age(ELDERLY)],
        ),
        high(
            "R4",
            "Severe chest pain in a diabetic smoker",
            [pain("Severe"), yes(Diabetes), smoker()],
        ),
        high(
            "R5",
            "Moderate chest pain in an elderly diabetic",
            [pain("Moderate"), age(ELDERLY), yes(Diabetes)],
        ),
        high(
            "R6",
            "Moderate chest pain, breathlessness, smoking and high blood pressure",
            [pain("Moderate"), yes(ShortBreath), smoker(), bp("High")],
        ),
        high(
            "R7",
            "Diabetic hypertensive smoker with family history",
            [yes(Diabetes), bp("High"), smoker(), yes(FamilyHistory)],
        ),
        high(
            "R8",
            "Elderly diabetic with high blood pressure",
            [age(ELDERLY), yes(Diabetes), bp("High")],
        ),
        high(
            "R9",
            "Inactive hypertensive smoker past young adulthood",
            [smoker(), inactive(), bp("High"), not_age(YOUNG)],
        ),
        high(
            "R10",
            "Inactive elderly diabetic with family history",
            [yes(FamilyHistory), yes(Diabetes), inactive(), age(ELDERLY)],
        ),
        high(
            "R11",
            "Female past young adulthood with fatigue, dizziness and cold sweats",
            [
                female(),
                yes(Fatigue),
                yes(Dizziness),
                yes(ColdSweat),
                not_age(YOUNG),
            ],
        ),
        high(
            "R12",
            "Diabetic with silent symptoms: breathlessness and cold sweats without chest pain",
            [yes(Diabetes), pain("None"), yes(ShortBreath), yes(ColdSweat)],
        ),
        high(
            "R13",
            "Elderly hypertensive with fatigue and dizziness",
            [age(ELDERLY), yes(Fatigue), yes(Dizziness), bp("High")],
        ),
        high(
            "R14",
            "Severe chest pain, inactivity and family history",
            [pain("Severe"), inactive(), yes(FamilyHistory)],
        ),
        high(
            "R15",
            "Middle-aged smoker with severe chest pain",
            [age(MIDDLE_AGED), pain("Severe"), smoker()],
        ),
        high(
            "R16",
            "High blood pressure with breathlessness and dizziness",
            [bp("High"), yes(ShortBreath), yes(Dizziness)],
        ),
        high(
            "R17",
            "Elderly with moderate chest pain and cold sweats",
            [pain("Moderate"), age(ELDERLY), yes(ColdSweat)],
        ),
        high(
            "R18",
            "Middle-aged male smoker with severe chest pain",
            [male(), age(MIDDLE_AGED), pain("Severe"), smoker()],
        ),
        high(
            "R19",
            "Diabetic hypertensive smoker",
            [yes(Diabetes), smoker(), bp("High")],
        ),
        high(
            "R20",
            "Elderly with breathlessness and family history",
            [age(ELDERLY), yes(ShortBreath), yes(FamilyHistory)],
        ),
        high(
            "R21",
            "Inactive diabetic with moderate chest pain",
            [pain("Moderate"), yes(Diabetes), inactive()],
        ),
        high(
            "R22",
            "Cold sweats and breathlessness with family history",
            [yes(ColdSweat), yes(ShortBreath), yes(FamilyHistory)],
        ),
        high(
            "R23",
            "Elderly hypertensive with moderate chest pain",
            [age(ELDERLY), pain("Moderate"), bp("High")],
        ),
        high(
            "R24",
            "Hypertensive smoker with dizziness",
            [smoker(), bp("High"), yes(Dizziness)],
        ),
        high(
            "R25",
            "Inactive elderly diabetic",
            [inactive(), yes(Diabetes), age(ELDERLY)],
        ),
        high(
            "R26",
            "Severe chest pain with fatigue and raised blood pressure",
            [pain("Severe"), yes(Fatigue), ne(Attribute::BloodPressure, "Normal")],
        ),
        high(
            "R27",
            "Elderly female with moderate chest pain",
            [female(), age(ELDERLY), pain("Moderate")],
        ),
        high(
            "R28",
            "Elderly hypertensive with family history",
            [bp("High"), age(ELDERLY), yes(FamilyHistory)],
        ),
        high(
            "R29",
            "Middle-aged diabetic smoker",
            [smoker(), yes(Diabetes), age(MIDDLE_AGED)],
        ),
        high(
            "R30",
            "Male smoker with severe chest pain",
            [pain("Severe"), male(), smoker()],
        ),
        high(
            "R31",
            "Breathlessness and fatigue with high blood pressure",
            [yes(ShortBreath), yes(Fatigue), bp("High")],
        ),
        high(
            "R32",
            "Elderly diabetic with cold sweats",
            [age(ELDERLY), yes(ColdSweat), yes(Diabetes)],
        ),
        high(
            "R33",
            "Moderate chest pain with dizziness and high blood pressure",
            [pain("Moderate"), yes(Dizziness), bp("High")],
        ),
        high(
            "R34",
            "Elderly smoker with family history",
            [yes(FamilyHistory), smoker(), age(ELDERLY)],
        ),
        high(
            "R35",
            "Elderly with severe chest pain and dizziness",
            [pain("Severe"), age(ELDERLY), yes(Dizziness)],
        ),
        high(
            "R36",
            "Diabetic female with severe chest pain",
            [female(), pain("Severe"), yes(Diabetes)],
        ),
        high(
            "R37",
            "Smoker with breathlessness and moderate chest pain",
            [smoker(), yes(ShortBreath), pain("Moderate")],
        ),
        high(
            "R38",
            "Diabetic with family history and severe chest pain",
            [yes(Diabetes), yes(FamilyHistory), pain("Severe")],
        ),
        high(
            "R39",
            "Inactive hypertensive with moderate chest pain",
            [bp("High"), inactive(), pain("Moderate")],
        ),
        high(
            "R40",
            "Middle-aged diabetic with breathlessness",
            [age(MIDDLE_AGED), yes(Diabetes), yes(ShortBreath)],
        ),
        // Moderate risk.
        moderate(
            "R41",
            "Middle-aged with mild or moderate chest pain and breathlessness",
            [
                age(MIDDLE_AGED),
                one_of(Attribute::ChestPain, ["Mild", "Moderate"]),
                yes(ShortBreath),
            ],
        ),
        moderate(
            "R42",
            "Smoker with mild or moderate chest pain",
            [smoker(), one_of(Attribute::ChestPain, ["Mild", "Moderate"])],
        ),
        moderate(
            "R43",
            "Fatigue and cold sweats with moderate chest pain",
            [yes(Fatigue), yes(ColdSweat), pain("Moderate")],
        ),
        moderate(
            "R44",
            "Elevated blood pressure with family history",
            [bp("Elevated"), yes(FamilyHistory)],
        ),
        moderate(
            "R45",
            "Inactive with moderate chest pain but no breathlessness",
            [inactive(), pain("Moderate"), no(ShortBreath)],
        ),
        moderate(
            "R46",
            "Middle-aged smoker with elevated blood pressure",
            [age(MIDDLE_AGED), smoker(), bp("Elevated")],
        ),
        moderate(
            "R47",
            "Young adult non-diabetic with moderate chest pain",
            [age(YOUNG), pain("Moderate"), no(Diabetes)],
        ),
        moderate(
            "R48",
            "Fatigued female with elevated blood pressure",
            [female(), yes(Fatigue), bp("Elevated")],
        ),
        moderate(
            "R49",
            "Mild chest pain with breathlessness past young adulthood",
            [pain("Mild"), yes(ShortBreath), not_age(YOUNG)],
        ),
        moderate(
            "R50",
            "Young smoker with chest pain",
            [smoker(), age(YOUNG), ne(Attribute::ChestPain, "None")],
        ),
        moderate(
            "R51",
            "Diabetic with elevated blood pressure",
            [bp("Elevated"), yes(Diabetes)],
        ),
        moderate(
            "R52",
            "Mild chest pain with family history",
            [yes(FamilyHistory), pain("Mild")],
        ),
        moderate(
            "R53",
            "Inactive elderly without chest pain",
            [age(ELDERLY), pain("None"), inactive()],
        ),
        moderate(
            "R54",
            "Middle-aged with dizziness and fatigue",
            [yes(Dizziness), yes(Fatigue), age(MIDDLE_AGED)],
        ),
        moderate(
            "R55",
            "Young male smoker",
            [male(), age(YOUNG), smoker()],
        ),
        moderate(
            "R56",
            "Elevated blood pressure with family history",
            [bp("Elevated"), yes(FamilyHistory)],
        ),
        moderate(
            "R57",
            "Active young adult with moderate chest pain",
            [pain("Moderate"), age(YOUNG), active()],
        ),
        moderate(
            "R58",
            "Middle-aged non-smoking diabetic",
            [yes(Diabetes), non_smoker(), age(MIDDLE_AGED)],
        ),
        moderate(
            "R59",
            "Fatigued elderly with normal blood pressure",
            [age(ELDERLY), yes(Fatigue), bp("Normal")],
        ),
        moderate(
            "R60",
            "Mild chest pain with cold sweats",
            [yes(ColdSweat), pain("Mild")],
        ),
        moderate(
            "R61",
            "Young adult with breathlessness and family history",
            [yes(ShortBreath), age(YOUNG), yes(FamilyHistory)],
        ),
        moderate(
            "R62",
            "Young adult with high blood pressure and no chest pain",
            [bp("High"), age(YOUNG), pain("None")],
        ),
        moderate(
            "R63",
            "Diabetic with mild chest pain",
            [pain("Mild"), yes(Diabetes)],
        ),
        moderate(
            "R64",
            "Inactive middle-aged with elevated blood pressure",
            [inactive(), age(MIDDLE_AGED), bp("Elevated")],
        ),
        moderate(
            "R65",
            "Fatigued smoker who is not elderly",
            [smoker(), yes(Fatigue), not_age(ELDERLY)],
        ),
        moderate(
            "R66",
            "Young female with moderate chest pain",
            [female(), pain("Moderate"), age(YOUNG)],
        ),
        moderate(
            "R67",
            "Young diabetic with family history",
            [yes(FamilyHistory), yes(Diabetes), age(YOUNG)],
        ),
        moderate(
            "R68",
            "Mild chest pain with dizziness",
            [pain("Mild"), yes(Dizziness)],
        ),
        moderate(
            "R69",
            "Inactive middle-aged without family history",
            [age(MIDDLE_AGED), inactive(), no(FamilyHistory)],
        ),
        moderate(
            "R70",
            "Smoker with elevated blood pressure",
            [bp("Elevated"), smoker()],
        ),
        moderate(
            "R71",
            "Fatigued elderly without chest pain",
            [yes(Fatigue), age(ELDERLY), pain("None")],
        ),
        moderate(
            "R72",
            "Middle-aged with breathlessness and normal blood pressure",
            [yes(ShortBreath), bp("Normal"), age(MIDDLE_AGED)],
        ),
        moderate(
            "R73",
            "Non-smoking non-diabetic with moderate chest pain",
            [pain("Moderate"), non_smoker(), no(Diabetes)],
        ),
        moderate(
            "R74",
            "Dizziness with family history",
            [yes(Dizziness), yes(FamilyHistory)],
        ),
        moderate(
            "R75",
            "Young diabetic",
            [age(YOUNG), yes(Diabetes)],
        ),
        // Low risk.
        low(
            "R76",
            "Young adult without chest pain, breathlessness or fatigue",
            [age(YOUNG), pain("None"), no(ShortBreath), no(Fatigue)],
        ),
        low(
            "R77",
            "Non-smoking non-diabetic with normal blood pressure",
            [non_smoker(), bp("Normal"), no(Diabetes)],
        ),
        low(
            "R78",
            "Active with at most mild chest pain and no cold sweats",
            [
                active(),
                one_of(Attribute::ChestPain, ["None", "Mild"]),
                no(ColdSweat),
            ],
        ),
        low(
            "R79",
            "No family history, dizziness or breathlessness",
            [no(FamilyHistory), no(Dizziness), no(ShortBreath)],
        ),
        low(
            "R80",
            "Active young adult without family history",
            [age(YOUNG), no(FamilyHistory), active()],
        ),
        low(
            "R81",
            "Young non-smoking male with normal blood pressure",
            [male(), age(YOUNG), bp("Normal"), non_smoker()],
        ),
        low(
            "R82",
            "Active middle-aged with normal blood pressure and no chest pain",
            [age(MIDDLE_AGED), active(), bp("Normal"), pain("None")],
        ),
        low(
            "R83",
            "Non-smoking non-diabetic without family history who is not elderly",
            [
                no(Diabetes),
                no(FamilyHistory),
                non_smoker(),
                not_age(ELDERLY),
            ],
        ),
        low(
            "R84",
            "No chest pain, breathlessness, dizziness or fatigue",
            [pain("None"), no(ShortBreath), no(Dizziness), no(Fatigue)],
        ),
        low(
            "R85",
            "Young non-smoker with normal or elevated blood pressure",
            [
                age(YOUNG),
                one_of(Attribute::BloodPressure, ["Normal", "Elevated"]),
                non_smoker(),
            ],
        ),
        low(
            "R86",
            "Active young adult with mild chest pain",
            [active(), age(YOUNG), pain("Mild")],
        ),
        low(
            "R87",
            "Middle-aged with normal blood pressure and no family history",
            [bp("Normal"), no(FamilyHistory), age(MIDDLE_AGED)],
        ),
        low(
            "R88",
            "Active young non-smoking female",
            [female(), age(YOUNG), non_smoker(), active()],
        ),
        low(
            "R89",
            "Young adult without fatigue, cold sweats or diabetes",
            [no(Fatigue), no(ColdSweat), no(Diabetes), age(YOUNG)],
        ),
        low(
            "R90",
            "Active non-smoker with normal blood pressure and no family history",
            [bp("Normal"), non_smoker(), active(), no(FamilyHistory)],
        ),
        low(
            "R91",
            "Young adult without dizziness, breathlessness or cold sweats",
            [age(YOUNG), no(Dizziness), no(ShortBreath), no(ColdSweat)],
        ),
        low(
            "R92",
            "Healthy middle-aged non-smoker without chest pain",
            [
                age(MIDDLE_AGED),
                non_smoker(),
                no(Diabetes),
                no(FamilyHistory),
                pain("None"),
            ],
        ),
        low(
            "R93",
            "Active female with normal blood pressure and no chest pain",
            [pain("None"), bp("Normal"), active(), female()],
        ),
        low(
            "R94",
            "Young adult without fatigue or family history",
            [age(YOUNG), no(Fatigue), no(FamilyHistory)],
        ),
        low(
            "R95",
            "Non-smoking non-diabetic with normal blood pressure and no breathlessness",
            [bp("Normal"), no(ShortBreath), no(Diabetes), non_smoker()],
        ),
        low(
            "R96",
            "Active, not elderly, without chest pain or dizziness",
            [active(), not_age(ELDERLY), pain("None"), no(Dizziness)],
        ),
        low(
            "R97",
            "Female without chest pain or family history and normal blood pressure",
            [female(), pain("None"), no(FamilyHistory), bp("Normal")],
        ),
        low(
            "R98",
            "Active non-smoking non-diabetic",
            [non_smoker(), no(Diabetes), active()],
        ),
        low(
            "R99",
            "Young adult without chest pain and with normal blood pressure",
            [age(YOUNG), pain("None"), bp("Normal")],
        ),
        low(
            "R100",
            "Young adult without family history or breathlessness",
            [no(FamilyHistory), age(YOUNG), no(ShortBreath)],
        ),
        low(
            "R101",
            "Young adult with normal blood pressure and no dizziness",
            [bp("Normal"), no(Dizziness), age(YOUNG)],
        ),
        low(
            "R102",
            "Active middle-aged without chest pain",
            [pain("None"), active(), age(MIDDLE_AGED)],
        ),
        low(
            "R103",
            "Young adult without cold sweats or diabetes",
            [age(YOUNG), no(ColdSweat), no(Diabetes)],
        ),
        low(
            "R104",
            "Non-smoker with normal blood pressure and no family history",
            [non_smoker(), no(FamilyHistory), bp("Normal")],
        ),
        low(
            "R105",
            "Active young male without chest pain",
            [age(YOUNG), male(), pain("None"), active()],
        ),
    ]
}

/// A shared engine over [`builtin_rules`], built on first use.
pub fn builtin_engine() -> &'static RuleEngine {
    static ENGINE: OnceLock<RuleEngine> = OnceLock::new();
    // The corpus is covered by tests that run it through `RuleEngine::new`.
    ENGINE.get_or_init(|| RuleEngine::from_validated(builtin_rules()))
}
