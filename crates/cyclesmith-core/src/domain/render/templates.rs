//! Static text of the generated files.

/// Indentation unit of generated C++.
pub const INDENT: &str = "   ";

/// Opening line of a Monte-Carlo-only block.
pub const MC_BLOCK_OPEN: &str = "if( id.GetType() == \"MC\" ) {";
pub const MC_BLOCK_CLOSE: &str = "}";

pub const HEADER_FRAME: &str = r#"// Dear emacs, this is -*- c++ -*-
#ifndef {{GUARD}}_H
#define {{GUARD}}_H

// STL include(s):
#include <string>
#include <vector>

// SFrame include(s):
#include "core/include/SCycleBase.h"

{{BODY}}
#endif // {{GUARD}}_H
"#;

pub const HEADER_BODY: &str = r#"/**
 *   @short Put short description of class here
 *
 *          Put a longer description over here...
 */
class {{CLASS}} : public SCycleBase {

public:
   /// Default constructor
   {{CLASS}}();
   /// Default destructor
   ~{{CLASS}}();

   /// Function called at the beginning of the cycle
   virtual void BeginCycle() throw( SError );
   /// Function called at the end of the cycle
   virtual void EndCycle() throw( SError );

   /// Function called at the beginning of a new input data
   virtual void BeginInputData( const SInputData& id ) throw( SError );
   /// Function called after finishing to process an input data
   virtual void EndInputData  ( const SInputData& id ) throw( SError );

   /// Function called after opening each new input file
   virtual void BeginInputFile( const SInputData& id ) throw( SError );

   /// Function called for every event
   virtual void ExecuteEvent( const SInputData& id, Double_t weight ) throw( SError );

private:
   //
   // Put all your private variables here
   //

   /// Name of the input tree
   std::string InTreeName;

   // Input variables
{{INPUT_DECLARATIONS}}

   // Output variables
{{OUTPUT_DECLARATIONS}}
{{FUNCTION_DECLARATIONS}}
   // Macro adding the functions for dictionary generation
   ClassDef( {{FULL_CLASS}}, 0 );

}; // class {{CLASS}}
"#;

pub const SOURCE_FRAME: &str = r#"// Local include(s):
#include "{{HEADER}}"

ClassImp( {{FULL_CLASS}} );

{{BODY}}"#;

pub const SOURCE_BODY: &str = r#"{{CLASS}}::{{CLASS}}()
   : SCycleBase() {

   SetLogName( GetName() );
   DeclareProperty( "InTreeName", InTreeName );
}

{{CLASS}}::~{{CLASS}}() {

}

void {{CLASS}}::BeginCycle() throw( SError ) {

   return;
}

void {{CLASS}}::EndCycle() throw( SError ) {

   return;
}

void {{CLASS}}::BeginInputData( const SInputData& id ) throw( SError ) {

{{OUTPUT_CONNECTIONS}}

   return;
}

void {{CLASS}}::EndInputData( const SInputData& id ) throw( SError ) {

   return;
}

void {{CLASS}}::BeginInputFile( const SInputData& id ) throw( SError ) {

{{INPUT_CONNECTIONS}}

   return;
}

void {{CLASS}}::ExecuteEvent( const SInputData& id, Double_t weight ) throw( SError ) {

{{OUTPUT_CLEARING}}
{{OUTPUT_FILLING}}

   return;
}
{{FUNCTION_BODIES}}"#;

pub const NAMESPACE_WRAPPER: &str = r#"namespace {{NAMESPACE}} {

{{BODY}}
} // namespace {{NAMESPACE}}
"#;

pub const FUNCTION_BODY: &str = r#"
void {{CLASS}}::{{FUNCTION}} {

{{LINES}}

   return;
}
"#;

pub const CONNECT_INPUT_SIGNATURE: &str = "ConnectInputVariables( const SInputData& id )";
pub const DECLARE_OUTPUT_SIGNATURE: &str = "DeclareOutputVariables( const SInputData& id )";
pub const CLEAR_OUTPUT_SIGNATURE: &str = "ClearOutputVariables()";

pub const CONNECT_INPUT_DECLARATION: &str = "   /// Connect the input variables to the input tree
   void ConnectInputVariables( const SInputData& id );
";
pub const DECLARE_OUTPUT_DECLARATION: &str = "   /// Declare the output variables to the output tree
   void DeclareOutputVariables( const SInputData& id );
";
pub const CLEAR_OUTPUT_DECLARATION: &str = "   /// Clear the container-like output variables
   void ClearOutputVariables();
";

pub const CONNECT_INPUT_CALL: &str = "   ConnectInputVariables( id );";
pub const DECLARE_OUTPUT_CALL: &str = "   DeclareOutputVariables( id );";
pub const CLEAR_OUTPUT_CALL: &str = "   ClearOutputVariables();";

pub const REGISTRY_SKELETON: &str = r#"// Dear emacs, this is -*- c++ -*-

#ifdef __CINT__

#pragma link off all globals;
#pragma link off all classes;
#pragma link off all functions;

#pragma link C++ nestedclass;

// Add the declarations of your cycles, and any other classes for which you
// want to generate a dictionary, here. The usual format is:
//
// #pragma link C++ class MySuperClass+;

{{NEW_LINES}}
#endif // __CINT__
"#;
