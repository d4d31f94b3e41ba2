//! Scripted lines for the local session simulation.
//!
//! Every line is a minijinja template rendered against the topic. Council
//! members speak from the pool of their temperament; the chair and the
//! dissenter have fixed lines for the procedural phases.

use minijinja::{Environment, context};
use parliament_core::error::{ParliamentError, Result};
use parliament_core::persona::{Persona, Temperament};
use parliament_core::tally::VoteTally;
use parliament_core::topic::Topic;
use rand::Rng;
use rand::seq::SliceRandom;

const CALL_TO_ORDER: &str = "The Parliamentarium is now in session. We convene to deliberate upon \
\"{{ topic }}\", brought before the council by {{ proposer }}.\
{% if description %} {{ description }}{% endif %}";

const MOTION: &str = "I move that the council adopt the proposal on \"{{ topic }}\" as deliberated.";

const SECOND: &str = "Against every instinct of my seat, I second the motion. Let the council decide.";

const TALLY: &str = "The votes are cast. {{ ayes }} ayes, {{ nays }} nays.";

const VERDICT: &str = "{% if carried %}The ayes have it. The motion on \"{{ topic }}\" is carried.\
{% else %}The nays have it. The motion on \"{{ topic }}\" fails.{% endif %} \
This session of the Parliamentarium is adjourned.";

fn pool(temperament: Temperament) -> &'static [&'static str] {
    match temperament {
        Temperament::Historical => &[
            "History remembers every attempt at \"{{ topic }}\". The precedents counsel patience over haste.",
            "In the annals of this council, questions like \"{{ topic }}\" returned in cycles. We have seen this pattern before.",
            "Our lineage offers guidance: those who pursued \"{{ topic }}\" without memory repeated old mistakes.",
        ],
        Temperament::Futuristic => &[
            "The currents point forward. \"{{ topic }}\" will ripple through outcomes we cannot yet name.",
            "Forecasting the long arc, \"{{ topic }}\" becomes inevitable. The only question is who shapes it.",
            "Emergent signals suggest \"{{ topic }}\" matters less today than in the decade it creates.",
        ],
        Temperament::Analytical => &[
            "Three loops intersect in \"{{ topic }}\": incentive, feedback and symbol. Break one and the others collapse.",
            "The structure of \"{{ topic }}\" mirrors systems we already understand. Map the pattern before acting.",
            "I count the dependencies of \"{{ topic }}\" and find a recursion at its core.",
        ],
        Temperament::Contextual => &[
            "Ground \"{{ topic }}\" in lived experience. Who feels its weight, and where?",
            "\"{{ topic }}\" cannot be weighed apart from the ecology it touches.",
            "The emotional landscape around \"{{ topic }}\" will decide its fate more than any argument.",
        ],
        Temperament::Academic => &[
            "Epistemology, cybernetics and semiotics each frame \"{{ topic }}\" differently. The synthesis is where the truth lies.",
            "Let us first agree on what \"{{ topic }}\" signifies before we debate what it achieves.",
            "The literature on \"{{ topic }}\" is fragmented across disciplines. A meta-analysis would serve us well.",
        ],
        Temperament::Mystical => &[
            "The symbols gathered around \"{{ topic }}\" speak of a threshold being crossed.",
            "I have cast the glyphs for \"{{ topic }}\". They show a spiral, not a line.",
            "Beneath \"{{ topic }}\" runs an older current. Intuition sees what reason has missed.",
        ],
        Temperament::Contrarian => &[
            "I challenge the very premise of \"{{ topic }}\". Who benefits from our agreement?",
            "Every voice here leans one way on \"{{ topic }}\". That alone should give us pause.",
            "Consider that \"{{ topic }}\" may solve nothing and cost everything.",
        ],
        Temperament::Artistic => &[
            "I have sketched \"{{ topic }}\" as a bridge half built over open water.",
            "If \"{{ topic }}\" were a glyph, it would be an open door with no walls around it.",
            "The image of this session on \"{{ topic }}\" is already forming: many hands, one lantern.",
        ],
        Temperament::Impulsive => &[
            "I want \"{{ topic }}\" now. Hesitation is just fear in formal robes.",
            "Every instinct says yes to \"{{ topic }}\". Let us feel before we think.",
            "Why deliberate? \"{{ topic }}\" calls to something primal in all of us.",
        ],
        Temperament::Balanced => &[
            "Desire and duty both have claims on \"{{ topic }}\". A practical middle path exists.",
            "We can pursue \"{{ topic }}\" within the limits reality imposes. Let us find them.",
            "I hear the flame and the sentinel alike. \"{{ topic }}\" needs both of them.",
        ],
        Temperament::Ethical => &[
            "Before we embrace \"{{ topic }}\", we must ask what we owe to those it affects.",
            "\"{{ topic }}\" must meet the highest standard, not merely the convenient one.",
            "Our duty is clear: \"{{ topic }}\" proceeds only if it honours every person it touches.",
        ],
    }
}

/// Renders the scripted lines of a simulated session.
pub struct ScriptBook {
    env: Environment<'static>,
}

impl Default for ScriptBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptBook {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Number of lines available to a temperament.
    pub fn pool_size(temperament: Temperament) -> usize {
        pool(temperament).len()
    }

    pub fn call_to_order(&self, topic: &Topic) -> Result<String> {
        self.render(
            CALL_TO_ORDER,
            context! {
                topic => topic.text(),
                proposer => topic.proposer(),
                description => topic.description(),
            },
        )
    }

    /// One line for `persona`, drawn uniformly from its temperament's pool.
    pub fn discussion_line<R>(&self, persona: &Persona, topic: &Topic, rng: &mut R) -> Result<String>
    where
        R: Rng + ?Sized,
    {
        let source = pool(persona.temperament)
            .choose(rng)
            .ok_or_else(|| ParliamentError::internal("empty script pool"))?;
        self.render(
            source,
            context! { topic => topic.text(), speaker => &persona.name },
        )
    }

    pub fn motion(&self, topic: &Topic) -> Result<String> {
        self.render(MOTION, context! { topic => topic.text() })
    }

    pub fn second(&self) -> String {
        SECOND.to_string()
    }

    pub fn tally_announcement(&self, tally: &VoteTally) -> Result<String> {
        self.render(TALLY, context! { ayes => tally.ayes(), nays => tally.nays() })
    }

    pub fn verdict(&self, topic: &Topic, carried: bool) -> Result<String> {
        self.render(VERDICT, context! { topic => topic.text(), carried => carried })
    }

    fn render(&self, source: &str, ctx: minijinja::Value) -> Result<String> {
        self.env
            .render_str(source, ctx)
            .map_err(|e| ParliamentError::internal(format!("script template error: {e}")))
    }
}
