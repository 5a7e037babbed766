//! Loan-verb paradigm table for English/Swahili code-mixed text.
//!
//! Each row pairs an English verb root with its Swahili translation and the
//! inflected forms the mixing normalizer substitutes in. Row order is a
//! first-match contract: lookups scan top to bottom and stop at the first
//! row whose English root occurs in the word.

/// One loan-verb row. Field names follow Bantu verbal morphology: the
/// applicative (-ia), subjunctive (-ie), passive (-iwa) and reciprocal
/// (-ana) extensions, plus the negative final vowel form (-ii).
#[derive(Debug, Clone, Copy)]
pub struct VerbParadigm {
    pub english: &'static str,
    pub swahili: &'static str,
    pub applicative: &'static str,
    pub subjunctive: &'static str,
    pub passive: &'static str,
    pub reciprocal: &'static str,
    pub negative: &'static str,
    pub past: &'static str,
}

const fn row(
    english: &'static str,
    swahili: &'static str,
    applicative: &'static str,
    subjunctive: &'static str,
    passive: &'static str,
    reciprocal: &'static str,
    negative: &'static str,
    past: &'static str,
) -> VerbParadigm {
    VerbParadigm {
        english,
        swahili,
        applicative,
        subjunctive,
        passive,
        reciprocal,
        negative,
        past,
    }
}

pub const LOAN_VERBS: &[VerbParadigm] = &[
    row("show", "onyesha", "onyeshea", "onyeshee", "onyeshwa", "onyesheana", "onyeshei", "showed"),
    row("try", "jaribu", "jaribia", "jaribie", "jaribishwa", "jaribiana", "jaribii", "tried"),
    row("cook", "pika", "pikia", "pikie", "pikiwa", "pikiana", "pikii", "cooked"),
    row("come", "kuja", "kujia", "kujie", "kujiwa", "kujiana", "kujii", "came"),
    row("read", "soma", "somea", "somee", "somewa", "someana", "somei", "read"),
    row("do", "fanya", "fanyia", "fanyie", "fanyiwa", "fanyiana", "fanyii", "did"),
    row("feel", "hisi", "hisia", "hisie", "hisiwa", "hisiana", "hisii", "felt"),
    row("spoil", "haribu", "haribia", "haribie", "haribiwa", "haribiana", "haribii", "spoilt"),
    row("wait", "ngoja", "ngojea", "ngojee", "ngojiwa", "ngojiana", "ngojii", "waited"),
    row("write", "andika", "andikia", "andikie", "andikiwa", "andikiana", "andikii", "wrote"),
    row("present", "onyesha", "onyeshea", "onyeshee", "onyeshewa", "onyesheana", "onyeshei", "presented"),
    row("sleep", "lala", "lalia", "lalie", "laliwa", "laliana", "lalii", "slept"),
    row("drink", "kunywa", "kunyia", "kunyie", "kunyiwa", "kunyiana", "kunyii", "drank"),
    row("move", "songa", "songea", "songee", "songiwa", "songiana", "songii", "moved"),
    row("smell", "nuka", "nukia", "nukie", "nukiwa", "nukiana", "nukii", "smelt"),
    row("call", "piga", "pigia", "pigie", "pigiwa", "pigiana", "pigii", "called"),
    row("open", "fungua", "fungua", "fungulie", "funguliwa", "funguliana", "fungulii", "opened"),
    row("close", "funga", "fungia", "fungie", "fungiwa", "fungiana", "fungii", "closed"),
    row("finish", "maliza", "malizia", "malizie", "maliziwa", "maliziana", "malizii", "finished"),
    row("loose", "poteza", "potezea", "potezee", "potezewa", "potezeana", "potezei", "lost"),
    row("go", "enda", "endea", "endee", "endewa", "endeana", "endei", "went"),
    row("look", "ona", "onea", "onee", "onewa", "oneana", "onei", "looked"),
    row("come", "kuja", "kujia", "kujie", "kujiwa", "kujiana", "kujii", "came"),
    row("ask", "uliza", "ulizia", "ulizie", "uliziwa", "uliziana", "ulizii", "asked"),
    row("tell", "ambia", "ambia", "ambie", "ambiwa", "ambiana", "ambii", "told"),
    row("help", "saidia", "saidia", "saidie", "saidiwa", "saidiana", "saidii", "helped"),
    row("miss", "kosa", "kosea", "kosee", "kosewa", "koseana", "kosei", "missed"),
    row("wait", "ngoja", "ngojea", "ngojee", "ngojiwa", "ngojiana", "ngojii", "waited"),
    row("text", "andika", "andikia", "andikie", "andikiwa", "andikiana", "andikii", "texted"),
    row("get", "pata", "patia", "patie", "patiwa", "patiana", "patii", "got"),
    row("send", "tuma", "tumia", "tumie", "tumiwa", "tumiana", "tumii", "sent"),
    row("remove", "ondoa", "ondolea", "ondolee", "ondolewa", "ondoleana", "ondolei", "removed"),
    row("delete", "ondoa", "ondolea", "ondolee", "ondolewa", "ondoleana", "ondolei", "deleted"),
    row("drive", "endesha", "endeshea", "endeshee", "endeshewa", "endesheana", "endeshii", "drove"),
    row("bring", "leta", "letea", "letee", "letewa", "leteana", "letii", "brought"),
    row("forget", "sahau", "sahaulia", "sahaulie", "sahauliwa", "sahauliana", "sahaulii", "forgot"),
    row("type", "andika", "andikia", "andikie", "andikiwa", "andikiana", "andikii", "typed"),
    row("look", "angalia", "angalilia", "angalilie", "angaliliwa", "angaliana", "angalii", "looked"),
    row("look", "angalia", "angalilia", "angalilie", "angaliliwa", "angaliana", "angalii", "looked"),
    row("run", "kimbia", "kimbilia", "kimbilie", "kimbiliwa", "kimbiliana", "kimbilii", "ran"),
    row("work", "fanya", "fanyia", "fanyie", "fanyiwa", "fanyiana", "fanyii", "worked"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_for_repeated_roots() {
        let first = LOAN_VERBS
            .iter()
            .find(|r| r.english == "come")
            .map(|r| r.swahili);
        assert_eq!(first, Some("kuja"));
    }

    #[test]
    fn cook_row_carries_all_extensions() {
        let cook = LOAN_VERBS
            .iter()
            .find(|r| r.english == "cook")
            .unwrap();
        assert_eq!(cook.swahili, "pika");
        assert_eq!(cook.applicative, "pikia");
        assert_eq!(cook.subjunctive, "pikie");
        assert_eq!(cook.passive, "pikiwa");
        assert_eq!(cook.reciprocal, "pikiana");
        assert_eq!(cook.negative, "pikii");
        assert_eq!(cook.past, "cooked");
    }

    #[test]
    fn table_rows_are_lowercase_ascii() {
        for r in LOAN_VERBS {
            for s in [
                r.english,
                r.swahili,
                r.applicative,
                r.subjunctive,
                r.passive,
                r.reciprocal,
                r.negative,
                r.past,
            ] {
                assert!(!s.is_empty());
                assert!(s.chars().all(|c| c.is_ascii_lowercase()));
            }
        }
    }
}
